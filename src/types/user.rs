use entity::user::Model as UserModel;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RUserRegister {
    pub phone_number: String,
    pub full_name: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RUserLogin {
    pub phone_number: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RUserEdit {
    pub phone_number: Option<String>,
    pub full_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserRegisterRes {
    pub id: i64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserLoginRes {
    pub jwt: String,
    pub user_id: i64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileRes {
    pub user_id: i64,
    pub full_name: String,
    pub phone_number: String,
}

impl From<UserModel> for UserProfileRes {
    fn from(user: UserModel) -> Self {
        UserProfileRes {
            user_id: user.id,
            full_name: user.full_name,
            phone_number: user.phone_number,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageRes {
    pub message: String,
}

/// Row payload handed to storage on signup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DBUserCreate {
    pub phone_number: String,
    pub full_name: String,
    pub password_hash: String,
    pub salt: String,
}

/// Lookup criteria; set fields are combined with AND.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub id: Option<i64>,
    pub phone_number: Option<String>,
}

impl UserFilter {
    pub fn by_id(id: i64) -> Self {
        UserFilter { id: Some(id), ..Default::default() }
    }

    pub fn by_phone_number(phone_number: impl Into<String>) -> Self {
        UserFilter { phone_number: Some(phone_number.into()), ..Default::default() }
    }
}
