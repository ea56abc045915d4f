use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    RequestPartsExt,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use kernel::model::{auth::AccessToken, id::UserId, user::User};
use registry::AppRegistry;
use shared::error::AppError;

// リクエスト処理の最初の段階で、アクセストークンから利用者を特定する
pub struct AuthorizedUser {
    pub access_token: AccessToken,
    pub user: User,
}

impl AuthorizedUser {
    pub fn id(&self) -> UserId {
        self.user.user_id
    }

    pub fn is_admin(&self) -> bool {
        self.user.is_admin()
    }
}

#[async_trait]
impl FromRequestParts<AppRegistry> for AuthorizedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        registry: &AppRegistry,
    ) -> Result<Self, Self::Rejection> {
        // ヘッダーからアクセストークンを取り出す
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AppError::UnauthorizedError)?;
        let access_token = AccessToken(bearer.token().to_string());

        // アクセストークンが紐づくユーザー ID を抽出する
        let user_id = registry
            .auth_repository()
            .fetch_user_id_from_token(&access_token)
            .await?
            .ok_or(AppError::UnauthorizedError)?;

        // ユーザー ID でデータベースからユーザーのレコードを引く
        let user = registry
            .user_repository()
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::UnauthorizedError)?;

        Ok(Self { access_token, user })
    }
}

// axum::Json と同じだが、失敗時も他のエラーと同じ形式で返す
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: serde::de::DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Self(value)),
            // 項目の欠落や型の誤りはフィールド単位の入力エラーにする
            Err(JsonRejection::JsonDataError(e)) => {
                let text = e.body_text();
                let detail = data_error_detail(&text);
                Err(match data_error_field(detail) {
                    Some(field) => AppError::invalid_field(field, detail),
                    None => AppError::BadRequest(text),
                })
            }
            Err(JsonRejection::MissingJsonContentType(_)) => Err(AppError::BadRequest(
                "Content-Type は application/json である必要があります。".into(),
            )),
            Err(rejection) => Err(AppError::BadRequest(rejection.body_text())),
        }
    }
}

// "Failed to deserialize ...: <path>: <message> at line 1 column 2" から
// 先頭の説明と位置情報を取り除く
fn data_error_detail(text: &str) -> &str {
    let detail = text.split_once(": ").map_or(text, |(_, detail)| detail);
    detail
        .rfind(" at line ")
        .map_or(detail, |pos| &detail[..pos])
}

fn data_error_field(detail: &str) -> Option<String> {
    if let Some(rest) = detail.strip_prefix("missing field `") {
        return rest.split_once('`').map(|(field, _)| field.to_string());
    }
    // 型の誤りは "title: invalid type: ..." のようにパスが先頭に付く
    let (path, _) = detail.split_once(": ")?;
    if path.is_empty() || path.contains(' ') {
        return None;
    }
    path.split(|c| c == '.' || c == '[')
        .next()
        .filter(|field| !field.is_empty())
        .map(String::from)
}

// axum::extract::Path と同じだが、ID として解釈できない値は NotFound にする
pub struct PathParam<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for PathParam<T>
where
    T: serde::de::DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(error.message = %rejection.body_text(), "invalid path parameter");
                Err(AppError::EntityNotFound(
                    "指定されたリソースが見つかりませんでした。".into(),
                ))
            }
        }
    }
}
