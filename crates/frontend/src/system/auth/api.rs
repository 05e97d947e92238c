use contracts::system::auth::UserInfo;
use gloo_net::http::Request;

use crate::shared::api_utils::api_url;
use crate::shared::error::RemoteError;

/// Current user of the stored session
pub async fn get_current_user(access_token: &str) -> Result<UserInfo, RemoteError> {
    let response = Request::get(&api_url("/api/system/auth/me"))
        .header("Authorization", &format!("Bearer {}", access_token))
        .send()
        .await
        .map_err(RemoteError::transport)?;

    match response.status() {
        401 => return Err(RemoteError::NotAuthenticated),
        status if !response.ok() => {
            return Err(RemoteError::Status {
                status,
                message: response.status_text(),
            })
        }
        _ => {}
    }

    response.json::<UserInfo>().await.map_err(RemoteError::decode)
}
