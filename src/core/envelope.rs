//! Purpose: Decode one JSON response envelope into a typed result.
//! Exports: `Envelope`, `Payload`, `ErrorInfo`.
//! Role: Stable decoding layer between the transport and presenters.
//! Invariants: A decoded envelope holds exactly one of `error` or `payload`.
//! Invariants: List vs single shape is discriminated by the `items` field only.
//! Invariants: `total_items` is carried verbatim; never reconciled with `items.len()`.
#![allow(clippy::result_large_err)]

use crate::core::error::{Error, ErrorKind};
use crate::core::options::OptionsBag;
use crate::json::parse;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const KEY_USER: &str = "user";
const KEY_GROUP: &str = "group";
const KEY_CATEGORY: &str = "category";

/// Backend-reported failure, as carried on the wire.
#[derive(Clone, Debug, Deserialize, Serialize, Eq, PartialEq)]
pub struct ErrorInfo {
    pub message: String,
    pub code: String,
}

/// Success-path data: a page of items or one detail record.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload<T> {
    List {
        items: Vec<T>,
        total_items: i64,
        options: Option<OptionsBag>,
    },
    Single {
        detail: T,
        options: Option<OptionsBag>,
    },
}

/// The decoded result of one API call.
///
/// `id` and `method` echo the request; the decoder never extracts them
/// from the response body, callers populate them when issuing a request.
#[derive(Clone, Debug, PartialEq)]
pub struct Envelope<T> {
    api_version: Option<String>,
    id: Option<String>,
    method: Option<String>,
    error: Option<ErrorInfo>,
    payload: Option<Payload<T>>,
}

impl<T: DeserializeOwned> Envelope<T> {
    /// Decode a parsed response object.
    ///
    /// The branch order is part of the contract: a present `error` field
    /// wins over everything else and `data` is then left uninspected,
    /// even when malformed.
    pub fn decode(raw: &Value) -> Result<Self, Error> {
        let object = raw.as_object().ok_or_else(|| {
            Error::new(ErrorKind::Malformed).with_message("response envelope is not a JSON object")
        })?;

        let api_version = match object.get("apiVersion") {
            Some(value) => Some(
                value
                    .as_str()
                    .ok_or_else(|| {
                        Error::new(ErrorKind::Malformed)
                            .with_message("apiVersion is not a string")
                            .with_field("apiVersion")
                    })?
                    .to_string(),
            ),
            None => None,
        };

        if let Some(raw_error) = object.get("error") {
            let error: ErrorInfo = serde_json::from_value(raw_error.clone()).map_err(|err| {
                Error::new(ErrorKind::Malformed)
                    .with_message("error object is missing message/code or mistyped")
                    .with_field("error")
                    .with_source(err)
            })?;
            return Ok(Self {
                api_version,
                id: None,
                method: None,
                error: Some(error),
                payload: None,
            });
        }

        let data = object.get("data").ok_or_else(|| {
            Error::new(ErrorKind::MissingPayload)
                .with_message("response carries neither error nor data")
        })?;
        let data_object = data.as_object().ok_or_else(|| {
            Error::new(ErrorKind::Malformed)
                .with_message("data is not a JSON object")
                .with_field("data")
        })?;

        let payload = if let Some(raw_items) = data_object.get("items") {
            let items: Vec<T> = serde_json::from_value(raw_items.clone()).map_err(|err| {
                Error::new(ErrorKind::Malformed)
                    .with_message("items did not decode as an array of the item type")
                    .with_field("data.items")
                    .with_source(err)
            })?;
            let total_items = data_object
                .get("totalItems")
                .and_then(Value::as_i64)
                .ok_or_else(|| {
                    Error::new(ErrorKind::Malformed)
                        .with_message("totalItems is absent or not an integer")
                        .with_field("data.totalItems")
                })?;
            Payload::List {
                items,
                total_items,
                options: decode_options(data_object)?,
            }
        } else {
            let detail: T = serde_json::from_value(data.clone()).map_err(|err| {
                Error::new(ErrorKind::Malformed)
                    .with_message("data did not decode as the item type")
                    .with_field("data")
                    .with_source(err)
            })?;
            Payload::Single {
                detail,
                options: decode_options(data_object)?,
            }
        };

        Ok(Self {
            api_version,
            id: None,
            method: None,
            error: None,
            payload: Some(payload),
        })
    }

    /// Parse a response body and decode it.
    pub fn decode_str(raw: &str) -> Result<Self, Error> {
        let value: Value = parse::from_str(raw).map_err(|err| {
            Error::new(ErrorKind::Malformed)
                .with_message("response body is not valid JSON")
                .with_source(err)
        })?;
        Self::decode(&value)
    }

    /// Parse a raw response byte buffer and decode it.
    pub fn decode_slice(raw: &[u8]) -> Result<Self, Error> {
        let value: Value = parse::from_slice(raw).map_err(|err| {
            Error::new(ErrorKind::Malformed)
                .with_message("response body is not valid JSON")
                .with_source(err)
        })?;
        Self::decode(&value)
    }
}

impl<T> Envelope<T> {
    pub fn from_error(error: ErrorInfo) -> Self {
        Self {
            api_version: None,
            id: None,
            method: None,
            error: Some(error),
            payload: None,
        }
    }

    pub fn list(items: Vec<T>, total_items: i64, options: Option<OptionsBag>) -> Self {
        Self {
            api_version: None,
            id: None,
            method: None,
            error: None,
            payload: Some(Payload::List {
                items,
                total_items,
                options,
            }),
        }
    }

    pub fn single(detail: T, options: Option<OptionsBag>) -> Self {
        Self {
            api_version: None,
            id: None,
            method: None,
            error: None,
            payload: Some(Payload::Single { detail, options }),
        }
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = Some(api_version.into());
        self
    }

    /// Record the request id this envelope answers. Caller-side bookkeeping only.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Record the HTTP method the request used. Caller-side bookkeeping only.
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn api_version(&self) -> Option<&str> {
        self.api_version.as_deref()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }

    pub fn error(&self) -> Option<&ErrorInfo> {
        self.error.as_ref()
    }

    pub fn payload(&self) -> Option<&Payload<T>> {
        self.payload.as_ref()
    }

    pub fn into_payload(self) -> Option<Payload<T>> {
        self.payload
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    fn options(&self) -> Option<&OptionsBag> {
        match &self.payload {
            Some(Payload::List { options, .. }) | Some(Payload::Single { options, .. }) => {
                options.as_ref()
            }
            None => None,
        }
    }

    /// Look up an arbitrary key in the options bag.
    pub fn option_value(&self, key: &str) -> Result<&Value, Error> {
        self.options()
            .and_then(|bag| bag.get(key))
            .ok_or_else(|| Error::missing_option(key))
    }

    pub fn options_user(&self) -> Result<&Value, Error> {
        self.option_value(KEY_USER)
    }

    pub fn options_group(&self) -> Result<&Value, Error> {
        self.option_value(KEY_GROUP)
    }

    pub fn options_category(&self) -> Result<&Value, Error> {
        self.option_value(KEY_CATEGORY)
    }
}

impl<T: Serialize> Envelope<T> {
    /// Re-emit the wire shape this envelope decodes from.
    ///
    /// `id` and `method` are request echo and never appear on the wire.
    pub fn to_value(&self) -> Result<Value, Error> {
        let mut root = Map::new();
        if let Some(api_version) = &self.api_version {
            root.insert(
                "apiVersion".to_string(),
                Value::String(api_version.clone()),
            );
        }

        match (&self.error, &self.payload) {
            (Some(error), _) => {
                let value = serde_json::to_value(error).map_err(|err| {
                    Error::new(ErrorKind::Malformed)
                        .with_message("error info failed to serialize")
                        .with_field("error")
                        .with_source(err)
                })?;
                root.insert("error".to_string(), value);
            }
            (
                None,
                Some(Payload::List {
                    items,
                    total_items,
                    options,
                }),
            ) => {
                let mut data = Map::new();
                let items = serde_json::to_value(items).map_err(|err| {
                    Error::new(ErrorKind::Malformed)
                        .with_message("items failed to serialize")
                        .with_field("data.items")
                        .with_source(err)
                })?;
                data.insert("items".to_string(), items);
                data.insert("totalItems".to_string(), Value::from(*total_items));
                if let Some(options) = options {
                    data.insert("options".to_string(), options.to_value());
                }
                root.insert("data".to_string(), Value::Object(data));
            }
            (None, Some(Payload::Single { detail, options })) => {
                let mut value = serde_json::to_value(detail).map_err(|err| {
                    Error::new(ErrorKind::Malformed)
                        .with_message("detail failed to serialize")
                        .with_field("data")
                        .with_source(err)
                })?;
                if let Some(options) = options {
                    match &mut value {
                        Value::Object(map) => {
                            map.insert("options".to_string(), options.to_value());
                        }
                        _ => {
                            return Err(Error::new(ErrorKind::Malformed)
                                .with_message(
                                    "single payload with options must serialize to a JSON object",
                                )
                                .with_field("data"));
                        }
                    }
                }
                root.insert("data".to_string(), value);
            }
            (None, None) => {
                return Err(Error::new(ErrorKind::MissingPayload)
                    .with_message("envelope holds neither error nor payload"));
            }
        }

        Ok(Value::Object(root))
    }
}

fn decode_options(data: &Map<String, Value>) -> Result<Option<OptionsBag>, Error> {
    match data.get("options") {
        Some(value) => Ok(Some(OptionsBag::from_wire(value, "data.options")?)),
        None => Ok(None),
    }
}
