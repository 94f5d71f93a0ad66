use super::{client::ApiClient, types::ApiError};

impl ApiClient {
    pub async fn unread_notification_count(&self) -> Result<u64, ApiError> {
        let fallback = "Không thể tải thông báo";
        let response = self
            .send(fallback, |client, base| {
                client.get(format!("{}/api/notifications/unread-count", base))
            })
            .await?;
        Self::map_json_response(response, fallback).await
    }
}
