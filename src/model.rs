// src/model.rs
use bson::oid::ObjectId;
use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A document of the `comments` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    pub movie_id: ObjectId,
    pub text: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub date: DateTime<Utc>,
}

impl Comment {
    pub fn new(movie_id: ObjectId, user: &User, text: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            id: None,
            name: user.name.clone(),
            email: user.email.clone(),
            movie_id,
            text: text.into(),
            date,
        }
    }
}

/// The authenticated commenter, as handed over by the request layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// One row of the most-active-commenters report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommenterCount {
    #[serde(rename = "_id")]
    pub email: String,
    pub count: i64,
}
