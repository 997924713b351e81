//! FFI bindings for Synheart Cognition
//!
//! C-compatible entry points for hosts embedding the engine. All strings are
//! null-terminated UTF-8; returned strings are heap-allocated and must be
//! released with `cognition_free_string`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::cognitive::adapter::{parse_baseline, parse_samples};
use crate::cognitive::encoder::ReportEncoder;
use crate::cognitive::pipeline::{evaluate, CognitiveProcessor};
use crate::cognitive::projection::explain_adaptation;
use crate::cognitive::tokens::get_adaptive_tokens;
use crate::cognitive::types::{AdaptationMode, CognitiveState};
use crate::config::EngineConfig;
use crate::error::CognitionError;

thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

unsafe fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

/// Caller must free the result with `cognition_free_string`
fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// Store the error and return NULL, or hand back the string
fn into_c_result(result: Result<String, CognitionError>) -> *mut c_char {
    match result {
        Ok(s) => string_to_cstr(&s),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// NULL selects the default mode
unsafe fn parse_mode(mode: *const c_char) -> Result<AdaptationMode, CognitionError> {
    match cstr_to_string(mode) {
        Some(s) => s.parse(),
        None => Ok(AdaptationMode::default()),
    }
}

unsafe fn parse_state(state: *const c_char) -> Result<CognitiveState, CognitionError> {
    cstr_to_string(state)
        .ok_or_else(|| CognitionError::ParseError("Invalid state string pointer".to_string()))?
        .parse()
}

// ============================================================================
// Stateless API
// ============================================================================

/// Classify a JSON array of samples and return a report JSON object.
///
/// # Safety
/// - `samples_json` must be a valid null-terminated C string.
/// - `baseline_json` and `mode` may be NULL (no baseline, subtle mode).
/// - Returns a newly allocated string that must be freed with `cognition_free_string`.
/// - Returns NULL on error; call `cognition_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn cognition_analyze(
    samples_json: *const c_char,
    baseline_json: *const c_char,
    mode: *const c_char,
) -> *mut c_char {
    clear_last_error();

    let samples_str = match cstr_to_string(samples_json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid samples string pointer");
            return ptr::null_mut();
        }
    };

    let result = (|| -> Result<String, CognitionError> {
        let samples = parse_samples(&samples_str)?;
        let baseline = match cstr_to_string(baseline_json) {
            Some(json) => Some(parse_baseline(&json)?),
            None => None,
        };
        let mode = parse_mode(mode)?;

        let evaluation = evaluate(&samples, baseline.as_ref(), mode);
        ReportEncoder::new().encode_to_json(&evaluation)
    })();

    into_c_result(result)
}

/// Return the adaptive tokens for a state as a JSON object.
///
/// # Safety
/// - `state` must be a valid null-terminated C string; `mode` may be NULL.
/// - Returns a newly allocated string that must be freed with `cognition_free_string`.
/// - Returns NULL on error; call `cognition_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn cognition_tokens(
    state: *const c_char,
    mode: *const c_char,
) -> *mut c_char {
    clear_last_error();

    let result = (|| -> Result<String, CognitionError> {
        let state = parse_state(state)?;
        let mode = parse_mode(mode)?;
        let tokens = get_adaptive_tokens(state, mode);
        serde_json::to_string(&tokens).map_err(CognitionError::JsonError)
    })();

    into_c_result(result)
}

/// Return the user-facing explanation for a state.
///
/// # Safety
/// - `state` must be a valid null-terminated C string; `mode` may be NULL.
/// - Returns a newly allocated string that must be freed with `cognition_free_string`.
/// - Returns NULL on error; call `cognition_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn cognition_explain(
    state: *const c_char,
    mode: *const c_char,
) -> *mut c_char {
    clear_last_error();

    let result = (|| -> Result<String, CognitionError> {
        let state = parse_state(state)?;
        let mode = parse_mode(mode)?;
        Ok(explain_adaptation(state, &get_adaptive_tokens(state, mode)))
    })();

    into_c_result(result)
}

// ============================================================================
// Stateful Processor API
// ============================================================================

/// Opaque handle to a CognitiveProcessor
pub struct CognitionProcessorHandle {
    processor: CognitiveProcessor,
}

/// Create a processor from an engine config JSON object.
///
/// # Safety
/// - `config_json` may be NULL for defaults.
/// - Must be freed with `cognition_processor_free`.
/// - Returns NULL on error.
#[no_mangle]
pub unsafe extern "C" fn cognition_processor_new(
    config_json: *const c_char,
) -> *mut CognitionProcessorHandle {
    clear_last_error();

    let config = match cstr_to_string(config_json) {
        Some(json) => match EngineConfig::from_json(&json) {
            Ok(config) => config,
            Err(e) => {
                set_last_error(&e.to_string());
                return ptr::null_mut();
            }
        },
        None => EngineConfig::default(),
    };

    let handle = Box::new(CognitionProcessorHandle {
        processor: CognitiveProcessor::with_config(config),
    });
    Box::into_raw(handle)
}

/// Free a processor.
///
/// # Safety
/// - `processor` must be a pointer returned by `cognition_processor_new`, or NULL.
#[no_mangle]
pub unsafe extern "C" fn cognition_processor_free(processor: *mut CognitionProcessorHandle) {
    if !processor.is_null() {
        drop(Box::from_raw(processor));
    }
}

/// Evaluate a window of samples against the processor's rolling baseline.
///
/// # Safety
/// - `processor` must be a valid processor pointer.
/// - `samples_json` must be a valid null-terminated C string.
/// - Returns a newly allocated report string; NULL on error.
#[no_mangle]
pub unsafe extern "C" fn cognition_processor_process(
    processor: *mut CognitionProcessorHandle,
    samples_json: *const c_char,
) -> *mut c_char {
    clear_last_error();

    if processor.is_null() {
        set_last_error("Null processor pointer");
        return ptr::null_mut();
    }
    let handle = &mut *processor;

    let samples_str = match cstr_to_string(samples_json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid samples string pointer");
            return ptr::null_mut();
        }
    };

    let result = parse_samples(&samples_str)
        .and_then(|samples| handle.processor.process_to_json(&samples));

    into_c_result(result)
}

/// Serialize the processor's baseline store to JSON.
///
/// # Safety
/// - `processor` must be a valid processor pointer.
/// - Returns a newly allocated string; NULL on error.
#[no_mangle]
pub unsafe extern "C" fn cognition_processor_save_baselines(
    processor: *const CognitionProcessorHandle,
) -> *mut c_char {
    clear_last_error();

    if processor.is_null() {
        set_last_error("Null processor pointer");
        return ptr::null_mut();
    }

    into_c_result((*processor).processor.save_baselines())
}

/// Replace the processor's baseline store from JSON.
///
/// # Safety
/// - `processor` must be a valid processor pointer.
/// - `json` must be a valid null-terminated C string.
/// - Returns 0 on success, -1 on error.
#[no_mangle]
pub unsafe extern "C" fn cognition_processor_load_baselines(
    processor: *mut CognitionProcessorHandle,
    json: *const c_char,
) -> i32 {
    clear_last_error();

    if processor.is_null() {
        set_last_error("Null processor pointer");
        return -1;
    }

    let json_str = match cstr_to_string(json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid JSON string pointer");
            return -1;
        }
    };

    match (*processor).processor.load_baselines(&json_str) {
        Ok(()) => 0,
        Err(e) => {
            set_last_error(&e.to_string());
            -1
        }
    }
}

// ============================================================================
// Memory Management
// ============================================================================

/// Free a string returned by Cognition functions.
///
/// # Safety
/// - `ptr` must be a pointer returned by a Cognition function, or NULL.
#[no_mangle]
pub unsafe extern "C" fn cognition_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Get the last error message.
///
/// # Safety
/// - The returned pointer is valid until the next Cognition call on this thread.
/// - Do NOT free the returned pointer.
/// - Returns NULL if no error occurred.
#[no_mangle]
pub unsafe extern "C" fn cognition_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

/// Get the library version.
///
/// # Safety
/// - Returns a pointer to a static string. Do NOT free.
#[no_mangle]
pub unsafe extern "C" fn cognition_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}
