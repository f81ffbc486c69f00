// C ABI for a host presentation layer. Results are returned as owned C strings
// (JSON where structured) and must be released with `roman_cipher_free_string`.
use crate::core::engine::CipherEngine;
use crate::settings::parse_settings_toml;
use std::borrow::Cow;
use std::ffi::{c_char, c_int, CStr, CString};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::ptr;
use std::sync::OnceLock;
use tracing::{error, warn};

static ENGINE: OnceLock<CipherEngine> = OnceLock::new();

fn engine() -> &'static CipherEngine {
    ENGINE.get_or_init(CipherEngine::new)
}

/// Reads a borrowed C string. Null reads as empty; invalid UTF-8 sequences
/// become U+FFFD, which the codec treats like any other unknown character.
unsafe fn read_str<'a>(s: *const c_char) -> Cow<'a, str> {
    if s.is_null() {
        return Cow::Borrowed("");
    }
    CStr::from_ptr(s).to_string_lossy()
}

fn into_c_string(s: String) -> *mut c_char {
    match CString::new(s) {
        Ok(c) => c.into_raw(),
        Err(e) => {
            warn!("output contained an interior NUL: {e}");
            ptr::null_mut()
        }
    }
}

/// Installs the engine with custom settings. Must run before any other call.
/// Returns 0 on success, 1 if the engine was already initialized and -1 if
/// the settings are invalid. A null pointer selects the defaults.
///
/// # Safety
/// `settings_toml` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn roman_cipher_init(settings_toml: *const c_char) -> c_int {
    let settings = if settings_toml.is_null() {
        Ok(crate::settings::Settings::default())
    } else {
        parse_settings_toml(&read_str(settings_toml))
    };
    match settings {
        Ok(settings) => match ENGINE.set(CipherEngine::with_settings(settings)) {
            Ok(()) => 0,
            Err(_) => 1,
        },
        Err(e) => {
            error!("rejected settings: {e}");
            -1
        }
    }
}

/// Returns `{"roman": ..., "numeric": ...}`.
///
/// # Safety
/// `text` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn roman_cipher_encode(text: *const c_char) -> *mut c_char {
    let text = read_str(text);
    let result = catch_unwind(AssertUnwindSafe(|| {
        serde_json::to_string(&engine().encode(&text)).unwrap_or_else(|_| "{}".to_string())
    }));
    into_c_string(result.unwrap_or_else(|_| {
        error!("panic in roman_cipher_encode");
        "{}".to_string()
    }))
}

/// Returns the decoded plain text.
///
/// # Safety
/// `cipher` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn roman_cipher_decode(cipher: *const c_char) -> *mut c_char {
    let cipher = read_str(cipher);
    let result = catch_unwind(AssertUnwindSafe(|| engine().decode(&cipher)));
    into_c_string(result.unwrap_or_else(|_| {
        error!("panic in roman_cipher_decode");
        String::new()
    }))
}

/// Returns the scan outcome as JSON, e.g.
/// `{"classification":{"status":"valid","text":"XII","flavor":"roman"},"decoded":"L"}`.
///
/// # Safety
/// `raw` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn roman_cipher_scan(raw: *const c_char) -> *mut c_char {
    let raw = read_str(raw);
    let result = catch_unwind(AssertUnwindSafe(|| {
        serde_json::to_string(&engine().scan(&raw))
            .unwrap_or_else(|_| r#"{"classification":{"status":"invalid"},"decoded":null}"#.to_string())
    }));
    into_c_string(result.unwrap_or_else(|_| {
        error!("panic in roman_cipher_scan");
        r#"{"classification":{"status":"invalid"},"decoded":null}"#.to_string()
    }))
}

/// # Safety
/// `s` must be null or a pointer returned by one of the functions above.
#[no_mangle]
pub unsafe extern "C" fn roman_cipher_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}
