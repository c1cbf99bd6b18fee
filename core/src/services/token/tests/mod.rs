mod issuer_tests;
mod verifier_tests;

use crate::services::codec::{ClaimCodec, PaddedPassphrase};

use super::{TokenConfig, TokenIssuer, TokenVerifier};

pub(super) fn test_config() -> TokenConfig {
    TokenConfig::new("access-secret-for-tests", "refresh-secret-for-tests")
}

pub(super) fn test_codec() -> ClaimCodec {
    ClaimCodec::new("envelope-secret-for-tests", &PaddedPassphrase)
}

pub(super) fn issuer_and_verifier(config: TokenConfig) -> (TokenIssuer, TokenVerifier) {
    let verifier = TokenVerifier::new(&config, test_codec());
    (TokenIssuer::new(config, test_codec()), verifier)
}
