//! Endpoint paths relative to the API base URL. Keeping them here avoids string
//! drift between resource wrappers.

pub mod auth {
    pub const REGISTER: &str = "/register";
    pub const LOGIN: &str = "/login";
    pub const LOGOUT: &str = "/logout";
    pub const FORGOT_PASSWORD: &str = "/forgot-password";
    pub const RESET_PASSWORD: &str = "/reset-password";
    pub const CURRENT_USER: &str = "/user";
    pub const SEND_VERIFICATION_EMAIL: &str = "/send-verification-email";
    pub const VERIFY_EMAIL: &str = "/verify-email";
    pub const RESEND_EMAIL_VERIFICATION: &str = "/email/resend";

    #[must_use]
    pub fn email_verification_link(id: &str, hash: &str) -> String {
        format!("/email/verify/{id}/{hash}")
    }
}

pub mod siswa {
    pub const COLLECTION: &str = "/siswa";

    #[must_use]
    pub fn item(id: u64) -> String {
        format!("/siswa/{id}")
    }
}

pub mod hobby {
    pub const COLLECTION: &str = "/hobby";

    #[must_use]
    pub fn item(id: u64) -> String {
        format!("/hobby/{id}")
    }
}

pub mod phone {
    pub const COLLECTION: &str = "/phone";
}

pub mod users {
    pub const COLLECTION: &str = "/users";
    pub const SEARCH: &str = "/users/search";

    #[must_use]
    pub fn item(id: u64) -> String {
        format!("/users/{id}")
    }
}

pub mod profile {
    pub const CURRENT: &str = "/profile";
    pub const CHANGE_PASSWORD: &str = "/profile/change-password";
    pub const STATISTICS: &str = "/profile/statistics";
}
