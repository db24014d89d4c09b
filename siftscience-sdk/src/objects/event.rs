//! The table of events the v20x `events` endpoint understands natively.
//!
//! Built-in events are tagged `"$" + name` in the `$type` field. Custom
//! events use their raw name.

use std::borrow::Cow;

/// Natively supported event names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    CreateOrder,
    UpdateOrder,
    OrderStatus,
    Transaction,
    CreateAccount,
    UpdateAccount,
    UpdatePassword,
    AddItemToCart,
    RemoveItemFromCart,
    SubmitReview,
    SendMessage,
    Login,
    Logout,
    LinkSessionToUser,
    AddPromotion,
    CreateContent,
    UpdateContent,
    ContentStatus,
    FlagContent,
    Chargeback,
    Verification,
    SecurityNotification,
}

impl EventType {
    pub const ALL: [EventType; 22] = [
        EventType::CreateOrder,
        EventType::UpdateOrder,
        EventType::OrderStatus,
        EventType::Transaction,
        EventType::CreateAccount,
        EventType::UpdateAccount,
        EventType::UpdatePassword,
        EventType::AddItemToCart,
        EventType::RemoveItemFromCart,
        EventType::SubmitReview,
        EventType::SendMessage,
        EventType::Login,
        EventType::Logout,
        EventType::LinkSessionToUser,
        EventType::AddPromotion,
        EventType::CreateContent,
        EventType::UpdateContent,
        EventType::ContentStatus,
        EventType::FlagContent,
        EventType::Chargeback,
        EventType::Verification,
        EventType::SecurityNotification,
    ];

    /// Bare event name, e.g. `create_order`.
    pub fn name(self) -> &'static str {
        match self {
            EventType::CreateOrder => "create_order",
            EventType::UpdateOrder => "update_order",
            EventType::OrderStatus => "order_status",
            EventType::Transaction => "transaction",
            EventType::CreateAccount => "create_account",
            EventType::UpdateAccount => "update_account",
            EventType::UpdatePassword => "update_password",
            EventType::AddItemToCart => "add_item_to_cart",
            EventType::RemoveItemFromCart => "remove_item_from_cart",
            EventType::SubmitReview => "submit_review",
            EventType::SendMessage => "send_message",
            EventType::Login => "login",
            EventType::Logout => "logout",
            EventType::LinkSessionToUser => "link_session_to_user",
            EventType::AddPromotion => "add_promotion",
            EventType::CreateContent => "create_content",
            EventType::UpdateContent => "update_content",
            EventType::ContentStatus => "content_status",
            EventType::FlagContent => "flag_content",
            EventType::Chargeback => "chargeback",
            EventType::Verification => "verification",
            EventType::SecurityNotification => "security_notification",
        }
    }

    /// Value stamped into `$type`, e.g. `$create_order`.
    pub fn tag(self) -> &'static str {
        match self {
            EventType::CreateOrder => "$create_order",
            EventType::UpdateOrder => "$update_order",
            EventType::OrderStatus => "$order_status",
            EventType::Transaction => "$transaction",
            EventType::CreateAccount => "$create_account",
            EventType::UpdateAccount => "$update_account",
            EventType::UpdatePassword => "$update_password",
            EventType::AddItemToCart => "$add_item_to_cart",
            EventType::RemoveItemFromCart => "$remove_item_from_cart",
            EventType::SubmitReview => "$submit_review",
            EventType::SendMessage => "$send_message",
            EventType::Login => "$login",
            EventType::Logout => "$logout",
            EventType::LinkSessionToUser => "$link_session_to_user",
            EventType::AddPromotion => "$add_promotion",
            EventType::CreateContent => "$create_content",
            EventType::UpdateContent => "$update_content",
            EventType::ContentStatus => "$content_status",
            EventType::FlagContent => "$flag_content",
            EventType::Chargeback => "$chargeback",
            EventType::Verification => "$verification",
            EventType::SecurityNotification => "$security_notification",
        }
    }

    pub fn from_name(name: &str) -> Option<EventType> {
        EventType::ALL.into_iter().find(|t| t.name() == name)
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An event name resolved against the built-in table and the custom events
/// registered at configuration time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    Builtin(EventType),
    Custom(String),
}

impl EventKind {
    pub fn name(&self) -> &str {
        match self {
            EventKind::Builtin(t) => t.name(),
            EventKind::Custom(name) => name,
        }
    }

    /// Value stamped into `$type`. Custom names carry no `$` prefix.
    pub fn tag(&self) -> Cow<'_, str> {
        match self {
            EventKind::Builtin(t) => Cow::Borrowed(t.tag()),
            EventKind::Custom(name) => Cow::Borrowed(name.as_str()),
        }
    }
}
