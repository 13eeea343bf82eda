//! Diesel schema for message persistence.

diesel::table! {
    /// Direct messages with per-side soft-delete flags.
    messages (id) {
        /// Message identifier.
        id -> Uuid,
        /// Sender username.
        #[max_length = 255]
        sender_username -> Varchar,
        /// Recipient username.
        #[max_length = 255]
        recipient_username -> Varchar,
        /// Message body.
        content -> Text,
        /// When the message was sent.
        sent_at -> Timestamptz,
        /// When the recipient read the message.
        read_at -> Nullable<Timestamptz>,
        /// Hidden from the sender.
        sender_deleted -> Bool,
        /// Hidden from the recipient.
        recipient_deleted -> Bool,
    }
}

diesel::table! {
    /// Profile photos used by message summaries.
    photos (id) {
        /// Photo identifier.
        id -> Uuid,
        /// Owning username.
        #[max_length = 255]
        username -> Varchar,
        /// Public photo URL.
        url -> Text,
        /// Whether this is the owner's main photo.
        is_main -> Bool,
    }
}
