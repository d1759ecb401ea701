// SPDX-License-Identifier: Apache-2.0

//! gRPC Bearer-token auth interceptor.

/// Constant-time string comparison to avoid a timing side-channel on
/// token comparison.
pub fn constant_time_eq(a: &str, b: &str) -> bool {
    let a = a.as_bytes();
    let b = b.as_bytes();
    if a.len() != b.len() {
        return false;
    }
    let mut acc = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        acc |= x ^ y;
    }
    acc == 0
}

/// Interceptor validating `Authorization: Bearer <token>` against a fixed
/// expected token on every RPC.
#[derive(Clone)]
pub struct AuthInterceptor {
    pub token: String,
}

impl tonic::service::Interceptor for AuthInterceptor {
    fn call(&mut self, req: tonic::Request<()>) -> Result<tonic::Request<()>, tonic::Status> {
        let header = req
            .metadata()
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| tonic::Status::unauthenticated("missing authorization header"))?;

        let bearer = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| tonic::Status::unauthenticated("invalid authorization scheme"))?;

        if constant_time_eq(bearer, &self.token) {
            Ok(req)
        } else {
            Err(tonic::Status::unauthenticated("invalid token"))
        }
    }
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
