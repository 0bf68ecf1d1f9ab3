//! Run-as identity injection.

use crate::model::ServiceConfig;

/// Whether `id` is a usable numeric user or group id.
pub fn is_valid_id(id: &str) -> bool {
    id.parse::<u32>().is_ok()
}

/// Whether `service` should receive the `uid:gid` identity.
///
/// An explicit `user` is never overridden.
pub fn should_inject(service: &ServiceConfig, uid: &str, gid: &str) -> bool {
    if service.user.as_deref().is_some_and(|u| !u.is_empty()) {
        tracing::debug!(service = %service.name, "Service declares a user, not injecting");
        return false;
    }
    if !is_valid_id(uid) || !is_valid_id(gid) {
        tracing::warn!(service = %service.name, uid = %uid, gid = %gid, "Invalid ownership identity, not injecting");
        return false;
    }
    true
}

/// The identity string written into `user`.
pub fn identity(uid: &str, gid: &str) -> String {
    format!("{uid}:{gid}")
}

/// Inject the identity when the policy allows it. Returns whether it did.
pub fn apply(service: &mut ServiceConfig, uid: &str, gid: &str) -> bool {
    if !should_inject(service, uid, gid) {
        return false;
    }
    service.user = Some(identity(uid, gid));
    true
}
