//! Redis client implementation
//!
//! Multiplexed async connection with connect/operation retry and the handful
//! of commands the Redis stores need: conditional set with expiry, plain
//! get/set/delete, existence checks and script evaluation.

use redis::{aio::MultiplexedConnection, AsyncCommands, Client, ErrorKind, RedisError, RedisResult, Script};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::{debug, error, info, warn};

use crate::config::CacheConfig;
use crate::InfrastructureError;

type RedisFuture<T> = Pin<Box<dyn Future<Output = RedisResult<T>> + Send>>;

/// Redis client with connection retry
///
/// Cheap to clone; clones share the multiplexed connection.
#[derive(Clone)]
pub struct RedisClient {
    /// Redis multiplexed connection for async operations
    connection: MultiplexedConnection,
    /// Configuration used to create this client
    config: CacheConfig,
    /// Maximum number of attempts per operation
    max_retries: u32,
    /// Base delay between retries (exponential backoff)
    retry_delay_ms: u64,
    /// Upper bound on a single command round trip
    response_timeout: Duration,
}

impl RedisClient {
    /// Connect using the retry count from configuration
    ///
    /// # Example
    /// ```no_run
    /// use sw_infra::config::CacheConfig;
    /// use sw_infra::cache::RedisClient;
    ///
    /// async fn create_client() -> Result<RedisClient, Box<dyn std::error::Error>> {
    ///     let config = CacheConfig::new("redis://localhost:6379").with_prefix("sessionward");
    ///     let client = RedisClient::new(config).await?;
    ///     Ok(client)
    /// }
    /// ```
    pub async fn new(config: CacheConfig) -> Result<Self, InfrastructureError> {
        let max_retries = config.max_retries.max(1);
        Self::new_with_retry_config(config, max_retries, 100).await
    }

    /// Connect with custom retry configuration
    pub async fn new_with_retry_config(
        config: CacheConfig,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<Self, InfrastructureError> {
        info!("Creating Redis client with URL: {}", mask_url(&config.url));

        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!("Failed to parse Redis URL: {}", e);
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let connection = Self::create_connection_with_retry(
            client,
            max_retries,
            retry_delay_ms,
            Duration::from_secs(config.connection_timeout),
        )
        .await?;

        info!("Redis client created successfully");

        let response_timeout = Duration::from_secs(config.response_timeout);
        Ok(Self {
            connection,
            config,
            max_retries,
            retry_delay_ms,
            response_timeout,
        })
    }

    async fn create_connection_with_retry(
        client: Client,
        max_retries: u32,
        retry_delay_ms: u64,
        connection_timeout: Duration,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = retry_delay_ms;

        loop {
            attempts += 1;
            debug!("Attempting to connect to Redis (attempt {})", attempts);

            let connect = with_deadline(
                connection_timeout,
                client.get_multiplexed_async_connection(),
                "Redis connection timed out",
            );
            match connect.await {
                Ok(connection) => {
                    info!("Successfully connected to Redis");
                    return Ok(connection);
                }
                Err(e) if attempts < max_retries => {
                    warn!(
                        "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(5000);
                }
                Err(e) => {
                    error!("Failed to connect to Redis after {} attempts: {}", attempts, e);
                    return Err(InfrastructureError::Cache(e));
                }
            }
        }
    }

    /// Prefix a key with the configured namespace
    pub fn make_key(&self, key: &str) -> String {
        self.config.make_key(key)
    }

    /// `SET key value NX EX ttl`
    ///
    /// Returns `true` if the key was written, `false` if it already existed.
    pub async fn set_nx_with_expiry(
        &self,
        key: &str,
        value: &str,
        expiry_seconds: u64,
    ) -> Result<bool, InfrastructureError> {
        let key = key.to_string();
        let value = value.to_string();

        self.execute_with_retry(move |mut conn| {
            let key = key.clone();
            let value = value.clone();
            Box::pin(async move {
                let reply: Option<String> = redis::cmd("SET")
                    .arg(&key)
                    .arg(&value)
                    .arg("NX")
                    .arg("EX")
                    .arg(expiry_seconds)
                    .query_async(&mut conn)
                    .await?;
                Ok(reply.is_some())
            })
        })
        .await
        .map_err(InfrastructureError::Cache)
    }

    /// Set a value without expiry
    pub async fn set(&self, key: &str, value: &str) -> Result<(), InfrastructureError> {
        let key = key.to_string();
        let value = value.to_string();

        self.execute_with_retry(move |mut conn| {
            let key = key.clone();
            let value = value.clone();
            Box::pin(async move { conn.set::<_, _, ()>(key, value).await })
        })
        .await
        .map_err(InfrastructureError::Cache)
    }

    /// Get a value
    pub async fn get(&self, key: &str) -> Result<Option<String>, InfrastructureError> {
        let key = key.to_string();

        self.execute_with_retry(move |mut conn| {
            let key = key.clone();
            Box::pin(async move { conn.get::<_, Option<String>>(key).await })
        })
        .await
        .map_err(InfrastructureError::Cache)
    }

    /// Delete a key; `true` if it existed
    pub async fn delete(&self, key: &str) -> Result<bool, InfrastructureError> {
        let key = key.to_string();

        self.execute_with_retry(move |mut conn| {
            let key = key.clone();
            Box::pin(async move { conn.del::<_, u32>(key).await })
        })
        .await
        .map(|deleted| deleted > 0)
        .map_err(InfrastructureError::Cache)
    }

    /// Check if a key exists
    pub async fn exists(&self, key: &str) -> Result<bool, InfrastructureError> {
        let key = key.to_string();

        self.execute_with_retry(move |mut conn| {
            let key = key.clone();
            Box::pin(async move { conn.exists::<_, bool>(key).await })
        })
        .await
        .map_err(InfrastructureError::Cache)
    }

    /// Run a Lua script against one key
    ///
    /// Scripts are executed atomically by the server. Not retried: a replayed
    /// compare-and-set would observe its own write and report a conflict.
    pub async fn eval_script(
        &self,
        script: &Script,
        key: &str,
        args: &[String],
    ) -> Result<i64, InfrastructureError> {
        let mut conn = self.connection.clone();
        let mut invocation = script.key(key);
        for arg in args {
            invocation.arg(arg);
        }

        let call = invocation.invoke_async::<_, i64>(&mut conn);
        with_deadline(self.response_timeout, call, "Redis script timed out")
            .await
            .map_err(|e| {
                error!("Redis script failed: {}", e);
                InfrastructureError::Cache(e)
            })
    }

    /// PING the server
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        debug!("Performing Redis health check");

        let response = self
            .execute_with_retry(|mut conn| {
                Box::pin(async move { redis::cmd("PING").query_async::<_, String>(&mut conn).await })
            })
            .await
            .map_err(|e| {
                error!("Redis health check failed: {}", e);
                InfrastructureError::Cache(e)
            })?;

        if response == "PONG" {
            Ok(true)
        } else {
            warn!("Redis health check returned unexpected response: {}", response);
            Ok(false)
        }
    }

    /// Run an operation, retrying transient failures with exponential backoff
    async fn execute_with_retry<F, T>(&self, operation: F) -> RedisResult<T>
    where
        F: Fn(MultiplexedConnection) -> RedisFuture<T>,
    {
        let mut attempts = 0;
        let mut delay = self.retry_delay_ms;

        loop {
            attempts += 1;
            let conn = self.connection.clone();

            match with_deadline(self.response_timeout, operation(conn), "Redis response timed out").await {
                Ok(result) => return Ok(result),
                Err(e) if attempts < self.max_retries && is_retriable_error(&e) => {
                    warn!(
                        "Redis operation failed (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, self.max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(5000);
                }
                Err(e) => {
                    error!("Redis operation failed after {} attempts: {}", attempts, e);
                    return Err(e);
                }
            }
        }
    }
}

/// Bound a Redis future, reporting an elapsed deadline as an I/O error
///
/// A zero limit disables the deadline.
pub(crate) async fn with_deadline<T, F>(limit: Duration, call: F, message: &'static str) -> RedisResult<T>
where
    F: Future<Output = RedisResult<T>>,
{
    if limit.is_zero() {
        return call.await;
    }

    match timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(RedisError::from((ErrorKind::IoError, message))),
    }
}

/// Whether an error is transient and worth retrying
pub(crate) fn is_retriable_error(error: &RedisError) -> bool {
    matches!(
        error.kind(),
        ErrorKind::IoError | ErrorKind::BusyLoadingError | ErrorKind::TryAgain
    )
}

/// Mask credentials in a Redis URL for logging
pub(crate) fn mask_url(url: &str) -> String {
    if let Some(at_pos) = url.find('@') {
        if let Some(proto_end) = url.find("://") {
            let proto = &url[..proto_end + 3];
            let host_part = &url[at_pos..];
            return format!("{}****{}", proto, host_part);
        }
    }
    url.to_string()
}
