//! C-compatible API for foreign hosts.
//!
//! The host owns an explicit service handle: create it with
//! [`study_advisor_new`], release it with [`study_advisor_free`]. Strings
//! returned by Rust must be released with [`study_advisor_free_str`].

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use crate::common::config::AppCfg;
use crate::common::error::{AdvisorCode, AdvisorError};
use crate::inference::service::RecommendationService;

use super::contract::{self, ApiResponse};

/// ABI version to coordinate with hosts.
#[no_mangle]
pub extern "C" fn study_advisor_api_version() -> u32 {
    1
}

/// Create a service configured from the environment. Training is deferred.
#[no_mangle]
pub extern "C" fn study_advisor_new() -> *mut RecommendationService {
    let cfg = AppCfg::load();
    Box::into_raw(Box::new(RecommendationService::new(cfg.train_config())))
}

/// Train eagerly. Returns an [`AdvisorCode`]; 0 on success.
///
/// # Safety
/// `handle` must come from [`study_advisor_new`] and not be freed yet.
#[no_mangle]
pub unsafe extern "C" fn study_advisor_train(handle: *const RecommendationService) -> u32 {
    let Some(service) = (unsafe { handle.as_ref() }) else {
        return AdvisorCode::MalformedRequest as u32;
    };
    match service.initialize() {
        Ok(_) => AdvisorCode::Ok as u32,
        Err(err) => err.code() as u32,
    }
}

/// Run Recommend on a JSON request and return the JSON envelope (caller must free).
///
/// # Safety
/// `handle` must come from [`study_advisor_new`]; `input` must be a valid
/// NUL-terminated string or null.
#[no_mangle]
pub unsafe extern "C" fn study_advisor_recommend(
    handle: *const RecommendationService,
    input: *const c_char,
) -> *mut c_char {
    let Some(service) = (unsafe { handle.as_ref() }) else {
        return failure_json("null service handle");
    };
    if input.is_null() {
        return failure_json("null request");
    }

    match unsafe { CStr::from_ptr(input) }.to_str() {
        Ok(input) => string_to_raw(contract::handle_json(service, input)),
        Err(e) => {
            let err = AdvisorError::malformed(format!("request is not valid UTF-8: {e}"));
            string_to_raw(ApiResponse::from(Err(err)).to_json())
        }
    }
}

/// Free strings allocated by Rust.
///
/// # Safety
/// `ptr` must come from this library and not be freed twice.
#[no_mangle]
pub unsafe extern "C" fn study_advisor_free_str(ptr: *mut c_char) {
    if ptr.is_null() {
        return;
    }
    drop(unsafe { CString::from_raw(ptr) });
}

/// Destroy a service handle.
///
/// # Safety
/// `handle` must come from [`study_advisor_new`] and not be freed twice.
#[no_mangle]
pub unsafe extern "C" fn study_advisor_free(handle: *mut RecommendationService) {
    if handle.is_null() {
        return;
    }
    drop(unsafe { Box::from_raw(handle) });
}

fn string_to_raw(s: String) -> *mut c_char {
    match CString::new(s) {
        Ok(cstring) => cstring.into_raw(),
        Err(_) => failure_json("response contained an interior NUL byte"),
    }
}

fn failure_json(reason: &str) -> *mut c_char {
    let body = serde_json::json!({ "success": false, "error": reason }).to_string();
    // serde_json escapes NUL, so this cannot fail.
    CString::new(body).unwrap_or_default().into_raw()
}
