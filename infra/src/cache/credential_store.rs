//! Redis implementation of the CredentialStore trait
//!
//! The fingerprint lives under one key per subject. Compare-and-set runs as
//! a Lua script so the read and the write are a single atomic step.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use redis::Script;

use sw_core::domain::value_objects::Fingerprint;
use sw_core::errors::StoreError;
use sw_core::repositories::{CasOutcome, CredentialStore};

use super::redis_client::RedisClient;

const KEY_PREFIX: &str = "credential";

/// KEYS[1] = credential key, ARGV[1] = expected, ARGV[2] = new or empty to clear
const COMPARE_AND_SET: &str = r#"
local current = redis.call('GET', KEYS[1])
if current ~= ARGV[1] then
    return 0
end
if ARGV[2] == '' then
    redis.call('DEL', KEYS[1])
else
    redis.call('SET', KEYS[1], ARGV[2])
end
return 1
"#;

static COMPARE_AND_SET_SCRIPT: Lazy<Script> = Lazy::new(|| Script::new(COMPARE_AND_SET));

/// Redis-backed credential store
#[derive(Clone)]
pub struct RedisCredentialStore {
    client: RedisClient,
}

impl RedisCredentialStore {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    fn key(&self, subject: &str) -> String {
        self.client.make_key(&credential_key(subject))
    }
}

pub(crate) fn credential_key(subject: &str) -> String {
    format!("{}:{}", KEY_PREFIX, subject)
}

#[async_trait]
impl CredentialStore for RedisCredentialStore {
    async fn get_fingerprint(&self, subject: &str) -> Result<Option<Fingerprint>, StoreError> {
        let value = self.client.get(&self.key(subject)).await?;
        Ok(value.map(Fingerprint::from_stored))
    }

    async fn set_fingerprint(&self, subject: &str, fingerprint: &Fingerprint) -> Result<(), StoreError> {
        Ok(self.client.set(&self.key(subject), fingerprint.as_str()).await?)
    }

    async fn compare_and_set_fingerprint(
        &self,
        subject: &str,
        expected: &Fingerprint,
        new: Option<&Fingerprint>,
    ) -> Result<CasOutcome, StoreError> {
        let args = [
            expected.as_str().to_string(),
            new.map(|f| f.as_str().to_string()).unwrap_or_default(),
        ];

        let swapped = self
            .client
            .eval_script(&COMPARE_AND_SET_SCRIPT, &self.key(subject), &args)
            .await?;

        Ok(if swapped == 1 {
            CasOutcome::Swapped
        } else {
            CasOutcome::Conflict
        })
    }

    async fn clear_fingerprint(&self, subject: &str) -> Result<(), StoreError> {
        self.client.delete(&self.key(subject)).await?;
        Ok(())
    }
}
