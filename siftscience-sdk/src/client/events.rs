//! `POST events`.

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use super::{Augment, ClientError, Operation, PendingRequest, SiftClient, object_payload};
use crate::objects::{EventKind, EventType};

/// Event submission namespace, obtained from [`SiftClient::events`].
///
/// Every submission serializes the caller's payload into a fresh object and
/// stamps `$type` and `$api_key` onto it; the caller's value is never
/// modified.
#[derive(Debug, Clone, Copy)]
pub struct Events<'a> {
    client: &'a SiftClient,
}

impl<'a> Events<'a> {
    pub(crate) fn new(client: &'a SiftClient) -> Self {
        Self { client }
    }

    /// Submit a built-in event.
    pub fn send<T>(&self, event: EventType, payload: &T) -> Result<PendingRequest, ClientError>
    where
        T: Serialize + ?Sized,
    {
        self.submit(event.tag(), payload)
    }

    /// Submit an event whose `$type` is exactly `event_type`, registered or
    /// not.
    pub fn custom_event<T>(&self, event_type: &str, payload: &T) -> Result<PendingRequest, ClientError>
    where
        T: Serialize + ?Sized,
    {
        if event_type.trim().is_empty() {
            return Err(ClientError::InvalidArgument {
                name: "event_type",
                reason: "must not be blank",
            });
        }
        self.submit(event_type, payload)
    }

    /// Submit a built-in or registered custom event by name (`login`,
    /// `submit_comment`, …).
    pub fn by_name<T>(&self, name: &str, payload: &T) -> Result<PendingRequest, ClientError>
    where
        T: Serialize + ?Sized,
    {
        let kind = self
            .lookup(name)
            .ok_or_else(|| ClientError::UnknownEvent(name.to_owned()))?;
        self.submit(&kind.tag(), payload)
    }

    pub fn lookup(&self, name: &str) -> Option<&'a EventKind> {
        self.client.event_kind(name)
    }

    /// Names accepted by [`by_name`](Self::by_name), in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &'a str> + 'a {
        self.client.event_names()
    }

    fn submit<T>(&self, tag: &str, payload: &T) -> Result<PendingRequest, ClientError>
    where
        T: Serialize + ?Sized,
    {
        let mut data = object_payload(payload)?;
        data.insert("$type".to_owned(), Value::String(tag.to_owned()));
        data.insert(
            "$api_key".to_owned(),
            Value::String(self.client.config().api_key().to_owned()),
        );

        let operation = self
            .client
            .v2(Method::POST, "events")?
            .json(Value::Object(data))
            .augment(Augment::Event);
        Ok(self.client.prepare(operation))
    }
}

macro_rules! event_methods {
    ($($method:ident => $event:ident),* $(,)?) => {
        impl Events<'_> {
            $(
                #[doc = concat!("Submit a `", stringify!($method), "` event.")]
                pub fn $method<T>(&self, payload: &T) -> Result<PendingRequest, ClientError>
                where
                    T: Serialize + ?Sized,
                {
                    self.send(EventType::$event, payload)
                }
            )*
        }

        #[cfg(test)]
        const EVENT_METHODS: &[(&str, EventType)] = &[
            $((stringify!($method), EventType::$event)),*
        ];
    };
}

event_methods! {
    create_order => CreateOrder,
    update_order => UpdateOrder,
    order_status => OrderStatus,
    transaction => Transaction,
    create_account => CreateAccount,
    update_account => UpdateAccount,
    update_password => UpdatePassword,
    add_item_to_cart => AddItemToCart,
    remove_item_from_cart => RemoveItemFromCart,
    add_promotion => AddPromotion,
    login => Login,
    logout => Logout,
    link_session_to_user => LinkSessionToUser,
    create_content => CreateContent,
    update_content => UpdateContent,
    content_status => ContentStatus,
    flag_content => FlagContent,
    chargeback => Chargeback,
    verification => Verification,
    security_notification => SecurityNotification,
    send_message => SendMessage,
    submit_review => SubmitReview,
}
