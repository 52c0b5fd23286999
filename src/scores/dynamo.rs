//! DynamoDB-backed score store.
//!
//! Records look like `{ image_id: S, score: N }`; both attribute names are
//! configurable. `add` is a single `UpdateItem` with an `ADD` expression, which
//! DynamoDB applies atomically and which creates the record when missing.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;
use imagerank_common::{Error, Result};

use super::ScoreStore;
use crate::aws::load_sdk_config;
use crate::config::ScoresConfig;

#[derive(Clone)]
pub struct DynamoScoreStore {
    client: Client,
    table: String,
    key_attribute: String,
    score_attribute: String,
}

impl DynamoScoreStore {
    pub fn new(client: Client, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
            key_attribute: "image_id".to_string(),
            score_attribute: "score".to_string(),
        }
    }

    pub fn with_attributes(
        mut self,
        key_attribute: impl Into<String>,
        score_attribute: impl Into<String>,
    ) -> Self {
        self.key_attribute = key_attribute.into();
        self.score_attribute = score_attribute.into();
        self
    }

    pub async fn from_config(scores: &ScoresConfig) -> Self {
        let sdk_config =
            load_sdk_config(scores.region.as_deref(), scores.endpoint_url.as_deref()).await;

        Self::new(Client::new(&sdk_config), &scores.table)
            .with_attributes(&scores.key_attribute, &scores.score_attribute)
    }

    fn key_value(&self, key: &str) -> AttributeValue {
        AttributeValue::S(key.to_string())
    }

    /// Read the score attribute out of an item; an item without one scores 0.
    fn score_from_item(&self, key: &str, item: &HashMap<String, AttributeValue>) -> Result<i64> {
        match item.get(&self.score_attribute) {
            None => Ok(0),
            Some(AttributeValue::N(number)) => parse_score(key, number),
            Some(other) => Err(Error::invalid_record(
                key,
                format!("{} is not a number: {:?}", self.score_attribute, other),
            )),
        }
    }
}

fn parse_score(key: &str, number: &str) -> Result<i64> {
    number
        .parse::<i64>()
        .map_err(|e| Error::invalid_record(key, format!("score '{number}' is not an integer: {e}")))
}

#[async_trait]
impl ScoreStore for DynamoScoreStore {
    fn name(&self) -> &'static str {
        "dynamodb"
    }

    async fn get(&self, key: &str) -> Result<Option<i64>> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table)
            .key(&self.key_attribute, self.key_value(key))
            .consistent_read(true)
            .send()
            .await
            .map_err(|e| Error::score_store(aws_sdk_dynamodb::Error::from(e)))?;

        output
            .item()
            .map(|item| self.score_from_item(key, item))
            .transpose()
    }

    async fn put(&self, key: &str, score: i64) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.table)
            .item(&self.key_attribute, self.key_value(key))
            .item(&self.score_attribute, AttributeValue::N(score.to_string()))
            .send()
            .await
            .map_err(|e| Error::score_store(aws_sdk_dynamodb::Error::from(e)))?;

        Ok(())
    }

    async fn add(&self, key: &str, delta: i64) -> Result<i64> {
        let output = self
            .client
            .update_item()
            .table_name(&self.table)
            .key(&self.key_attribute, self.key_value(key))
            .update_expression("ADD #score :delta")
            .expression_attribute_names("#score", &self.score_attribute)
            .expression_attribute_values(":delta", AttributeValue::N(delta.to_string()))
            .return_values(ReturnValue::UpdatedNew)
            .send()
            .await
            .map_err(|e| Error::score_store(aws_sdk_dynamodb::Error::from(e)))?;

        match output.attributes() {
            Some(attributes) => self.score_from_item(key, attributes),
            None => Err(Error::invalid_record(
                key,
                "update returned no attributes",
            )),
        }
    }
}
