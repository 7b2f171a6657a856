//! 更正存储服务 - 业务能力层
//!
//! 用户提交的答案更正保存在外部 JSON 文档里，键为问题原文：
//! - 会话开始时整体 GET 读取
//! - 提交更正时整体 PATCH 覆盖写回（后写者覆盖，无冲突检测）

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::StoreError;

/// 问题原文 -> 更正后的答案
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Corrections(BTreeMap<String, String>);

impl Corrections {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按问题原文精确查找
    pub fn get(&self, question: &str) -> Option<&str> {
        self.0.get(question).map(String::as_str)
    }

    pub fn insert(&mut self, question: impl Into<String>, answer: impl Into<String>) {
        self.0.insert(question.into(), answer.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 解析存储返回的文档
    ///
    /// 支持两种形态：直接的键值对象，或 `{"record": {...}}` 信封
    pub fn from_document(document: JsonValue) -> Result<Self, StoreError> {
        let JsonValue::Object(mut map) = document else {
            return Err(StoreError::MalformedDocument {
                message: "文档不是 JSON 对象".to_string(),
            });
        };

        let is_envelope = map.get("record").is_some_and(JsonValue::is_object)
            && map.keys().all(|k| k == "record" || k == "metadata");
        if is_envelope {
            if let Some(JsonValue::Object(record)) = map.remove("record") {
                map = record;
            }
        }

        let mut corrections = Corrections::new();
        for (question, answer) in map {
            match answer {
                JsonValue::String(answer) => corrections.insert(question, answer),
                other => warn!("忽略非字符串的更正条目 '{}': {}", question, other),
            }
        }

        Ok(corrections)
    }
}

/// 更正存储客户端
pub struct CorrectionStore {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
    key_header: String,
}

impl CorrectionStore {
    pub fn new(
        url: impl Into<String>,
        api_key: Option<String>,
        key_header: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            api_key,
            key_header: key_header.into(),
        }
    }

    /// 未配置 URL 时返回 None（存储功能关闭）
    pub fn from_config(config: &Config) -> Option<Self> {
        config.correction_store_url.as_ref().map(|url| {
            Self::new(
                url.clone(),
                config.correction_store_key.clone(),
                config.correction_store_key_header.clone(),
            )
        })
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.header(self.key_header.as_str(), key.as_str()),
            None => request,
        }
    }

    fn request_failed(&self, source: reqwest::Error) -> StoreError {
        StoreError::RequestFailed {
            url: self.url.clone(),
            source,
        }
    }

    /// 整体读取
    pub async fn fetch_all(&self) -> Result<Corrections, StoreError> {
        debug!("读取更正存储: {}", self.url);

        let response = self
            .authorize(self.client.get(&self.url))
            .send()
            .await
            .map_err(|e| self.request_failed(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::BadStatus {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let document: JsonValue = response.json().await.map_err(|e| self.request_failed(e))?;
        let corrections = Corrections::from_document(document)?;

        debug!("已读取 {} 条更正", corrections.len());
        Ok(corrections)
    }

    /// 整体覆盖写回
    pub async fn write_all(&self, corrections: &Corrections) -> Result<(), StoreError> {
        debug!("写回更正存储: {} 条", corrections.len());

        let response = self
            .authorize(self.client.patch(&self.url))
            .json(corrections)
            .send()
            .await
            .map_err(|e| self.request_failed(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::BadStatus {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        Ok(())
    }

    /// 提交一条更正：读取 -> 插入 / 覆盖 -> 整体写回
    pub async fn submit_correction(
        &self,
        question: &str,
        answer: &str,
    ) -> Result<Corrections, StoreError> {
        let mut corrections = self.fetch_all().await?;
        corrections.insert(question.trim(), answer.trim());
        self.write_all(&corrections).await?;

        info!("✓ 更正已保存: {}", question.trim());
        Ok(corrections)
    }
}

/// 会话开始时读取更正，失败只警告，流程继续
pub async fn load_corrections_or_empty(store: Option<&CorrectionStore>) -> Corrections {
    let Some(store) = store else {
        return Corrections::new();
    };

    match store.fetch_all().await {
        Ok(corrections) => corrections,
        Err(e) => {
            warn!("⚠️ 无法读取更正存储，继续处理但不使用已保存的更正: {}", e);
            Corrections::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[test]
    fn test_document_plain_map() {
        let corrections =
            Corrections::from_document(json!({"What is X?": "Y", "Bad": 3})).unwrap();
        assert_eq!(corrections.get("What is X?"), Some("Y"));
        assert_eq!(corrections.get("Bad"), None);
        assert_eq!(corrections.len(), 1);
    }

    #[test]
    fn test_document_envelope() {
        let corrections = Corrections::from_document(json!({
            "record": {"What is X?": "Y"},
            "metadata": {"id": "abc"}
        }))
        .unwrap();
        assert_eq!(corrections.get("What is X?"), Some("Y"));
        assert_eq!(corrections.len(), 1);
    }

    #[test]
    fn test_document_not_object() {
        assert!(matches!(
            Corrections::from_document(json!(["a"])),
            Err(StoreError::MalformedDocument { .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_sends_key_header() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/b/corrections")
                    .header("x-master-key", "secret");
                then.status(200).json_body(json!({"record": {"Q": "A"}}));
            })
            .await;

        let store = CorrectionStore::new(
            server.url("/b/corrections"),
            Some("secret".to_string()),
            "X-Master-Key",
        );
        let corrections = store.fetch_all().await.unwrap();

        mock.assert_async().await;
        assert_eq!(corrections.get("Q"), Some("A"));
    }

    #[tokio::test]
    async fn test_write_all_patches_whole_document() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(PATCH)
                    .path("/b/corrections")
                    .json_body(json!({"Q1": "A1", "Q2": "A2"}));
                then.status(200).json_body(json!({}));
            })
            .await;

        let store = CorrectionStore::new(server.url("/b/corrections"), None, "X-Master-Key");
        let mut corrections = Corrections::new();
        corrections.insert("Q1", "A1");
        corrections.insert("Q2", "A2");
        store.write_all(&corrections).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_submit_correction_merges_and_writes_back_everything() {
        let server = MockServer::start_async().await;
        let fetch = server
            .mock_async(|when, then| {
                when.method(GET).path("/b/corrections");
                then.status(200)
                    .json_body(json!({"record": {"Old": "1", "Q": "stale"}}));
            })
            .await;
        let write = server
            .mock_async(|when, then| {
                when.method(PATCH)
                    .path("/b/corrections")
                    .json_body(json!({"Old": "1", "Q": "new"}));
                then.status(200).json_body(json!({}));
            })
            .await;

        let store = CorrectionStore::new(server.url("/b/corrections"), None, "X-Master-Key");
        let corrections = store.submit_correction(" Q ", " new ").await.unwrap();

        fetch.assert_async().await;
        write.assert_async().await;
        assert_eq!(corrections.len(), 2);
        assert_eq!(corrections.get("Q"), Some("new"));
        assert_eq!(corrections.get("Old"), Some("1"));
    }

    #[tokio::test]
    async fn test_bad_status_is_reported() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/b/corrections");
                then.status(401);
            })
            .await;

        let store = CorrectionStore::new(server.url("/b/corrections"), None, "X-Master-Key");
        let err = store.fetch_all().await.unwrap_err();
        assert!(matches!(err, StoreError::BadStatus { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_unreachable_store_falls_back_to_empty() {
        let store = CorrectionStore::new("http://127.0.0.1:1/b", None, "X-Master-Key");
        let corrections = load_corrections_or_empty(Some(&store)).await;
        assert!(corrections.is_empty());
        assert!(load_corrections_or_empty(None).await.is_empty());
    }
}
