//! Network URL constants for the BitGo API.

/// Production API base URL.
pub const DEFAULT_API_URL: &str = "https://www.bitgo.com";

/// Test environment API base URL.
pub const TEST_API_URL: &str = "https://test.bitgo.com";

/// Local BitGo Express instance, as started by the BitGo Express docker image.
pub const LOCAL_EXPRESS_URL: &str = "http://0.0.0.0:3080";

/// Coin used when none is configured.
pub const DEFAULT_COIN: &str = "btc";
