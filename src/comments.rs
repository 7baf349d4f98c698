// src/comments.rs
use crate::error::{DaoError, Result};
use crate::model::{Comment, CommenterCount, User};

use bson::oid::ObjectId;
use bson::{doc, Document};
use chrono::{DateTime, Utc};
use futures::stream::TryStreamExt;
use mongodb::options::ReadConcern;
use mongodb::results::{DeleteResult, InsertOneResult, UpdateResult};
use mongodb::{Client, Collection};
use tokio::sync::OnceCell;
use tracing::{debug, error};

pub const COLLECTION: &str = "comments";

/// Size of the most-active-commenters report.
pub const TOP_COMMENTERS: i64 = 20;

/// Data access for the `comments` collection.
///
/// Built empty; `inject_db` sets the collection handle once and later calls
/// are ignored. Every operation fails with [`DaoError::Uninitialized`] until
/// then.
#[derive(Debug, Default)]
pub struct CommentsDao {
    comments: OnceCell<Collection<Comment>>,
}

impl CommentsDao {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience for callers that already have a client at hand.
    pub fn with_client(client: &Client, namespace: &str) -> Result<Self> {
        let dao = Self::new();
        dao.inject_db(client, namespace)?;
        Ok(dao)
    }

    pub fn inject_db(&self, client: &Client, namespace: &str) -> Result<()> {
        if self.comments.initialized() {
            debug!("Comments collection handle already set, ignoring inject_db");
            return Ok(());
        }

        if let Err(e) = validate_namespace(namespace) {
            error!("Unable to establish collection handles in CommentsDao: {}", e);
            return Err(e);
        }

        let collection = client.database(namespace).collection::<Comment>(COLLECTION);
        // A concurrent caller may have won; its handle stays.
        let _ = self.comments.set(collection);
        debug!("Comments collection handle set for database '{}'", namespace);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.comments.initialized()
    }

    /// Database the handle points at, if set.
    pub fn namespace(&self) -> Option<String> {
        self.comments.get().map(|c| c.namespace().db)
    }

    fn collection(&self) -> Result<&Collection<Comment>> {
        self.comments.get().ok_or(DaoError::Uninitialized)
    }

    /// Inserts a comment by `user` on the movie `movie_id`.
    ///
    /// The acknowledgment carries the generated `_id` in `inserted_id`.
    pub async fn add_comment(
        &self,
        movie_id: &str,
        user: &User,
        text: &str,
        date: DateTime<Utc>,
    ) -> Result<InsertOneResult> {
        self.insert_comment(movie_id, user, text, date)
            .await
            .inspect_err(|e| error!("Unable to post comment: {}", e))
    }

    async fn insert_comment(
        &self,
        movie_id: &str,
        user: &User,
        text: &str,
        date: DateTime<Utc>,
    ) -> Result<InsertOneResult> {
        let comment = Comment::new(parse_object_id(movie_id)?, user, text, date);
        let result = self.collection()?.insert_one(&comment).await?;
        Ok(result)
    }

    /// Sets `text` and `date` on the comment, provided `user_email` owns it.
    ///
    /// A comment owned by someone else is not an error: the result simply
    /// reports zero matched and modified documents.
    pub async fn update_comment(
        &self,
        comment_id: &str,
        user_email: &str,
        text: &str,
        date: DateTime<Utc>,
    ) -> Result<UpdateResult> {
        self.set_text(comment_id, user_email, text, date)
            .await
            .inspect_err(|e| error!("Unable to update comment: {}", e))
    }

    async fn set_text(
        &self,
        comment_id: &str,
        user_email: &str,
        text: &str,
        date: DateTime<Utc>,
    ) -> Result<UpdateResult> {
        let filter = owner_filter(parse_object_id(comment_id)?, user_email);
        let result = self
            .collection()?
            .update_one(filter, text_update(text, date))
            .await?;
        Ok(result)
    }

    /// Deletes the comment if `user_email` owns it. Errors are left for the
    /// caller to report.
    pub async fn delete_comment(&self, comment_id: &str, user_email: &str) -> Result<DeleteResult> {
        let filter = owner_filter(parse_object_id(comment_id)?, user_email);
        let result = self.collection()?.delete_one(filter).await?;
        Ok(result)
    }

    /// The twenty emails with the most comments, busiest first, read with
    /// majority read concern.
    pub async fn most_active_commenters(&self) -> Result<Vec<CommenterCount>> {
        self.count_by_email()
            .await
            .inspect_err(|e| error!("Unable to retrieve most active commenters: {}", e))
    }

    async fn count_by_email(&self) -> Result<Vec<CommenterCount>> {
        let cursor = self
            .collection()?
            .aggregate(most_active_pipeline())
            .read_concern(ReadConcern::majority())
            .await?;
        let rows: Vec<Document> = cursor.try_collect().await?;
        rows.into_iter()
            .map(|row| bson::from_document(row).map_err(DaoError::from))
            .collect()
    }
}

pub fn parse_object_id(value: &str) -> Result<ObjectId> {
    ObjectId::parse_str(value).map_err(|source| DaoError::InvalidId {
        value: value.to_string(),
        source,
    })
}

/// Matches a comment only when both id and owner agree.
fn owner_filter(id: ObjectId, email: &str) -> Document {
    doc! { "_id": id, "email": email }
}

fn text_update(text: &str, date: DateTime<Utc>) -> Document {
    doc! {
        "$set": {
            "text": text,
            "date": bson::DateTime::from_chrono(date),
        }
    }
}

fn most_active_pipeline() -> Vec<Document> {
    vec![
        doc! { "$group": { "_id": "$email", "count": { "$sum": 1 } } },
        doc! { "$sort": { "count": -1 } },
        doc! { "$limit": TOP_COMMENTERS },
    ]
}

fn validate_namespace(namespace: &str) -> Result<()> {
    const FORBIDDEN: [char; 13] = ['/', '\\', '.', ' ', '"', '$', '*', '<', '>', ':', '|', '?', '\0'];

    if namespace.is_empty() {
        return Err(DaoError::InvalidNamespace("database name is empty".to_string()));
    }
    if namespace.len() >= 64 {
        return Err(DaoError::InvalidNamespace(format!(
            "'{}' is longer than 63 bytes",
            namespace
        )));
    }
    if let Some(c) = namespace.chars().find(|c| FORBIDDEN.contains(c)) {
        return Err(DaoError::InvalidNamespace(format!(
            "'{}' contains forbidden character {:?}",
            namespace, c
        )));
    }
    Ok(())
}
