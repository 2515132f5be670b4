//! Coin shop API handlers.
//!
//! ```text
//! POST /api/auth {"username":"alice","password":"s3cret"}
//! GET /api/info
//! POST /api/sendCoin {"toUser":"bob","amount":200}
//! GET /api/buy/t-shirt
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{
    CoinHistory, Error, InventoryItem, LoginCredentials, LoginValidationError, Username,
    WalletInfo,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::BearerUser;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Body of `POST /api/auth`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthRequest {
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "s3cret")]
    pub password: String,
}

impl TryFrom<AuthRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: AuthRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// Bearer token returned by `POST /api/auth`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
}

/// Body of `POST /api/sendCoin`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendCoinRequest {
    #[schema(example = "bob")]
    pub to_user: String,
    #[schema(example = 200)]
    pub amount: i64,
}

/// One owned merch item.
#[derive(Debug, Deserialize, Serialize, ToSchema, PartialEq, Eq)]
pub struct InventoryEntry {
    #[serde(rename = "type")]
    #[schema(example = "t-shirt")]
    pub item_type: String,
    pub quantity: i64,
}

/// Transfer received from another user.
#[derive(Debug, Deserialize, Serialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReceivedEntry {
    pub from_user: String,
    pub amount: i64,
}

/// Transfer sent to another user.
#[derive(Debug, Deserialize, Serialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SentEntry {
    pub to_user: String,
    pub amount: i64,
}

/// Transfer history, oldest first.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema, PartialEq, Eq)]
pub struct CoinHistoryResponse {
    pub received: Vec<ReceivedEntry>,
    pub sent: Vec<SentEntry>,
}

/// Wallet summary returned by `GET /api/info`.
#[derive(Debug, Deserialize, Serialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InfoResponse {
    pub coins: i64,
    pub inventory: Vec<InventoryEntry>,
    pub coin_history: CoinHistoryResponse,
}

impl From<InventoryItem> for InventoryEntry {
    fn from(value: InventoryItem) -> Self {
        Self {
            item_type: value.item_type,
            quantity: value.quantity,
        }
    }
}

impl From<CoinHistory> for CoinHistoryResponse {
    fn from(value: CoinHistory) -> Self {
        Self {
            received: value
                .received
                .into_iter()
                .map(|r| ReceivedEntry {
                    from_user: r.from_user,
                    amount: r.amount,
                })
                .collect(),
            sent: value
                .sent
                .into_iter()
                .map(|s| SentEntry {
                    to_user: s.to_user,
                    amount: s.amount,
                })
                .collect(),
        }
    }
}

impl From<WalletInfo> for InfoResponse {
    fn from(value: WalletInfo) -> Self {
        Self {
            coins: value.coins,
            inventory: value.inventory.into_iter().map(Into::into).collect(),
            coin_history: value.coin_history.into(),
        }
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyUsername => Error::invalid_request("username must not be empty")
            .with_details(json!({ "field": "username", "code": "empty_username" })),
        LoginValidationError::UsernameTooLong { max } => {
            Error::invalid_request(format!("username must be at most {max} characters"))
                .with_details(json!({ "field": "username", "code": "username_too_long" }))
        }
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

/// Log in, registering the account with the starting balance on first use.
#[utoipa::path(
    post,
    path = "/api/auth",
    request_body = AuthRequest,
    responses(
        (status = 200, description = "Bearer token issued", body = AuthResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Wrong password", body = ErrorSchema),
        (status = 503, description = "Store busy, retry", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["shop"],
    operation_id = "auth",
    security([])
)]
#[post("/auth")]
pub async fn auth(
    state: web::Data<HttpState>,
    payload: web::Json<AuthRequest>,
) -> ApiResult<web::Json<AuthResponse>> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let token = state.login.authenticate(&credentials).await?;
    Ok(web::Json(AuthResponse {
        token: token.as_str().to_owned(),
    }))
}

/// Balance, owned items and transfer history of the caller.
#[utoipa::path(
    get,
    path = "/api/info",
    responses(
        (status = 200, description = "Wallet summary", body = InfoResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 404, description = "Account no longer exists", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["shop"],
    operation_id = "info"
)]
#[get("/info")]
pub async fn info(
    state: web::Data<HttpState>,
    caller: BearerUser,
) -> ApiResult<web::Json<InfoResponse>> {
    let wallet = state.wallet.wallet_info(caller.username()).await?;
    Ok(web::Json(wallet.into()))
}

/// Send coins from the caller to another user.
#[utoipa::path(
    post,
    path = "/api/sendCoin",
    request_body = SendCoinRequest,
    responses(
        (status = 200, description = "Coins sent"),
        (status = 400, description = "Invalid amount, self-transfer or insufficient coins", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 404, description = "Receiver not found", body = ErrorSchema),
        (status = 503, description = "Ledger busy, retry", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["shop"],
    operation_id = "sendCoin"
)]
#[post("/sendCoin")]
pub async fn send_coin(
    state: web::Data<HttpState>,
    caller: BearerUser,
    payload: web::Json<SendCoinRequest>,
) -> ApiResult<HttpResponse> {
    let SendCoinRequest { to_user, amount } = payload.into_inner();
    let receiver = Username::new(&to_user).map_err(|err| {
        Error::invalid_request(err.to_string())
            .with_details(json!({ "field": "toUser", "code": "invalid_username" }))
    })?;
    state
        .transfers
        .send_coins(caller.username(), &receiver, amount)
        .await?;
    Ok(HttpResponse::Ok().finish())
}

/// Buy one unit of a merch item.
#[utoipa::path(
    get,
    path = "/api/buy/{item}",
    params(("item" = String, Path, description = "Merch item name", example = "t-shirt")),
    responses(
        (status = 200, description = "Item bought"),
        (status = 400, description = "Insufficient coins", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 404, description = "Unknown item", body = ErrorSchema),
        (status = 503, description = "Ledger busy, retry", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["shop"],
    operation_id = "buy"
)]
#[get("/buy/{item}")]
pub async fn buy(
    state: web::Data<HttpState>,
    caller: BearerUser,
    item: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state
        .purchases
        .buy_item(caller.username(), item.as_str())
        .await?;
    Ok(HttpResponse::Ok().finish())
}

#[cfg(test)]
#[path = "shop_tests.rs"]
mod tests;
