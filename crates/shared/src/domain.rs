use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);
    };
}

id_newtype!(MovieId);
id_newtype!(ProfileId);

impl ProfileId {
    /// The only id the profile editor ever writes.
    pub const SINGLETON: ProfileId = ProfileId(1);
}

pub const PLACEHOLDER_NAME: &str = "John Doe";
pub const PLACEHOLDER_EMAIL: &str = "john.doe@example.com";
pub const PLACEHOLDER_PHONE: &str = "08123456789";

/// Summary of one catalog entry as returned by the popular-movies listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub overview: String,
}

/// Parse target for a popular-movies page. Paging metadata on the wire is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieResponse {
    pub results: Vec<Movie>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: ProfileId,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl UserProfile {
    pub fn singleton(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            id: ProfileId::SINGLETON,
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    /// Values shown while nothing has been saved yet.
    pub fn placeholder() -> Self {
        Self::singleton(PLACEHOLDER_NAME, PLACEHOLDER_EMAIL, PLACEHOLDER_PHONE)
    }
}
