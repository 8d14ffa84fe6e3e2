//! The operation catalog: one validated builder per remote operation.
//!
//! Each builder takes typed arguments, checks that the required strings are
//! actually present, and produces the [`RequestFrame`] to send together with
//! the [`OperationTag`] that names the operation just built.  Builders are
//! pure: sending the frame (and recording the tag as pending) is the client
//! layer's job.
//!
//! # Validation before I/O
//!
//! An empty alias, path, or password is a caller error, and the middleware
//! would only bounce it back after a wasted round trip.  Builders therefore
//! reject missing required arguments locally with
//! [`CatalogError::MissingArgument`] before any frame exists.
//!
//! The one deliberate exception: `browseKeyStore`'s `current_path` may be
//! empty, which means "list from the storage root".

use serde_json::Value;
use thiserror::Error;

use crate::protocol::frame::{OperationTag, RequestFrame};

/// Errors reported by the catalog builders before any network I/O.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    /// A required string argument was empty.
    #[error("required argument '{name}' for {method} is empty")]
    MissingArgument {
        /// Wire method name of the operation being built.
        method: &'static str,
        /// Name of the offending argument.
        name: &'static str,
    },
}

/// Rejects an empty required argument.
fn require(method: &'static str, name: &'static str, value: &str) -> Result<(), CatalogError> {
    if value.is_empty() {
        return Err(CatalogError::MissingArgument { method, name });
    }
    Ok(())
}

/// Builds a frame for `tag` from pre-validated arguments.
fn frame(tag: OperationTag, args: Vec<Value>) -> (RequestFrame, OperationTag) {
    (
        RequestFrame {
            method: tag.method(),
            args,
        },
        tag,
    )
}

/// `browseKeyStore(alias, storeType, currentPath)` — directory listing of a
/// key store.  `current_path` may be empty to list from the storage root.
pub fn browse_key_store(
    alias: &str,
    store_type: &str,
    current_path: &str,
) -> Result<(RequestFrame, OperationTag), CatalogError> {
    let tag = OperationTag::BrowseKeyStore;
    require(tag.method(), "alias", alias)?;
    require(tag.method(), "storeType", store_type)?;
    Ok(frame(
        tag,
        vec![
            Value::from(alias),
            Value::from(store_type),
            Value::from(current_path),
        ],
    ))
}

/// `getKeys(alias, path, password, keyTypeFilter)` — enumerate keys in a
/// store.  Use filter `"ALL"` for an unfiltered listing.
pub fn get_keys(
    alias: &str,
    path: &str,
    password: &str,
    key_type_filter: &str,
) -> Result<(RequestFrame, OperationTag), CatalogError> {
    let tag = OperationTag::GetKeys;
    require(tag.method(), "alias", alias)?;
    require(tag.method(), "path", path)?;
    require(tag.method(), "password", password)?;
    require(tag.method(), "keyTypeFilter", key_type_filter)?;
    Ok(frame(
        tag,
        vec![
            Value::from(alias),
            Value::from(path),
            Value::from(password),
            Value::from(key_type_filter),
        ],
    ))
}

/// `setLocale(languageCode)` — switch the middleware's message language.
pub fn set_locale(language_code: &str) -> Result<(RequestFrame, OperationTag), CatalogError> {
    let tag = OperationTag::SetLocale;
    require(tag.method(), "languageCode", language_code)?;
    Ok(frame(tag, vec![Value::from(language_code)]))
}

/// Shared builder for the four certificate-field getters, which all take
/// the same `(alias, path, keyAlias, password)` argument shape.
fn certificate_field(
    tag: OperationTag,
    alias: &str,
    path: &str,
    key_alias: &str,
    password: &str,
) -> Result<(RequestFrame, OperationTag), CatalogError> {
    require(tag.method(), "alias", alias)?;
    require(tag.method(), "path", path)?;
    require(tag.method(), "keyAlias", key_alias)?;
    require(tag.method(), "password", password)?;
    Ok(frame(
        tag,
        vec![
            Value::from(alias),
            Value::from(path),
            Value::from(key_alias),
            Value::from(password),
        ],
    ))
}

/// `getNotBefore(alias, path, keyAlias, password)` — certificate validity
/// start date.
pub fn get_not_before(
    alias: &str,
    path: &str,
    key_alias: &str,
    password: &str,
) -> Result<(RequestFrame, OperationTag), CatalogError> {
    certificate_field(OperationTag::GetNotBefore, alias, path, key_alias, password)
}

/// `getNotAfter(alias, path, keyAlias, password)` — certificate validity
/// end date.
pub fn get_not_after(
    alias: &str,
    path: &str,
    key_alias: &str,
    password: &str,
) -> Result<(RequestFrame, OperationTag), CatalogError> {
    certificate_field(OperationTag::GetNotAfter, alias, path, key_alias, password)
}

/// `getSubjectDN(alias, path, keyAlias, password)` — subject distinguished
/// name.
pub fn get_subject_dn(
    alias: &str,
    path: &str,
    key_alias: &str,
    password: &str,
) -> Result<(RequestFrame, OperationTag), CatalogError> {
    certificate_field(OperationTag::GetSubjectDn, alias, path, key_alias, password)
}

/// `getIssuerDN(alias, path, keyAlias, password)` — issuer distinguished
/// name.
pub fn get_issuer_dn(
    alias: &str,
    path: &str,
    key_alias: &str,
    password: &str,
) -> Result<(RequestFrame, OperationTag), CatalogError> {
    certificate_field(OperationTag::GetIssuerDn, alias, path, key_alias, password)
}

/// `getRdnByOid(alias, path, keyAlias, password, oid, occurrenceIndex)` —
/// one RDN component of the subject DN, selected by OID and occurrence.
///
/// `occurrence_index` is the only non-string wire argument; it selects the
/// n-th occurrence (0-based) when the DN contains the OID more than once.
pub fn get_rdn_by_oid(
    alias: &str,
    path: &str,
    key_alias: &str,
    password: &str,
    oid: &str,
    occurrence_index: u32,
) -> Result<(RequestFrame, OperationTag), CatalogError> {
    let tag = OperationTag::GetRdnByOid;
    require(tag.method(), "alias", alias)?;
    require(tag.method(), "path", path)?;
    require(tag.method(), "keyAlias", key_alias)?;
    require(tag.method(), "password", password)?;
    require(tag.method(), "oid", oid)?;
    Ok(frame(
        tag,
        vec![
            Value::from(alias),
            Value::from(path),
            Value::from(key_alias),
            Value::from(password),
            Value::from(oid),
            Value::from(occurrence_index),
        ],
    ))
}

/// `signPlainData(alias, path, keyAlias, password, plaintext)` — sign plain
/// data with the selected key.
pub fn sign_plain_data(
    alias: &str,
    path: &str,
    key_alias: &str,
    password: &str,
    plaintext: &str,
) -> Result<(RequestFrame, OperationTag), CatalogError> {
    let tag = OperationTag::SignPlainData;
    require(tag.method(), "alias", alias)?;
    require(tag.method(), "path", path)?;
    require(tag.method(), "keyAlias", key_alias)?;
    require(tag.method(), "password", password)?;
    require(tag.method(), "plaintext", plaintext)?;
    Ok(frame(
        tag,
        vec![
            Value::from(alias),
            Value::from(path),
            Value::from(key_alias),
            Value::from(password),
            Value::from(plaintext),
        ],
    ))
}

/// `verifyPlainData(alias, path, keyAlias, password, plaintext, signature)`
/// — verify a signature over plain data.
pub fn verify_plain_data(
    alias: &str,
    path: &str,
    key_alias: &str,
    password: &str,
    plaintext: &str,
    signature: &str,
) -> Result<(RequestFrame, OperationTag), CatalogError> {
    let tag = OperationTag::VerifyPlainData;
    require(tag.method(), "alias", alias)?;
    require(tag.method(), "path", path)?;
    require(tag.method(), "keyAlias", key_alias)?;
    require(tag.method(), "password", password)?;
    require(tag.method(), "plaintext", plaintext)?;
    require(tag.method(), "signature", signature)?;
    Ok(frame(
        tag,
        vec![
            Value::from(alias),
            Value::from(path),
            Value::from(key_alias),
            Value::from(password),
            Value::from(plaintext),
            Value::from(signature),
        ],
    ))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_keys_builds_documented_wire_frame() {
        // Arrange / Act: the exact call from the protocol documentation
        let (frame, tag) = get_keys("alias1", "/path/a.p12", "pw", "ALL").unwrap();

        // Assert: method, tag, and argument order all match the wire shape
        assert_eq!(tag, OperationTag::GetKeys);
        let parsed: serde_json::Value = serde_json::from_str(&frame.encode()).unwrap();
        assert_eq!(
            parsed,
            serde_json::json!({
                "method": "getKeys",
                "args": ["alias1", "/path/a.p12", "pw", "ALL"],
            })
        );
    }

    #[test]
    fn test_get_keys_empty_password_is_rejected() {
        let result = get_keys("alias1", "/path/a.p12", "", "ALL");
        assert_eq!(
            result,
            Err(CatalogError::MissingArgument {
                method: "getKeys",
                name: "password",
            })
        );
    }

    #[test]
    fn test_browse_key_store_allows_empty_current_path() {
        // Empty path means "list from the storage root" and must pass.
        let (frame, tag) = browse_key_store("PKCS12", "file", "").unwrap();
        assert_eq!(tag, OperationTag::BrowseKeyStore);
        assert_eq!(frame.args[2], serde_json::json!(""));
    }

    #[test]
    fn test_browse_key_store_empty_alias_is_rejected() {
        let result = browse_key_store("", "file", "/");
        assert!(matches!(
            result,
            Err(CatalogError::MissingArgument { name: "alias", .. })
        ));
    }

    #[test]
    fn test_set_locale_builds_single_argument_frame() {
        let (frame, tag) = set_locale("kk").unwrap();
        assert_eq!(tag, OperationTag::SetLocale);
        assert_eq!(frame.method, "setLocale");
        assert_eq!(frame.args, vec![serde_json::json!("kk")]);
    }

    #[test]
    fn test_certificate_field_getters_share_argument_shape() {
        // All four getters take (alias, path, keyAlias, password) in order.
        let builders: [(
            fn(&str, &str, &str, &str) -> Result<(RequestFrame, OperationTag), CatalogError>,
            OperationTag,
        ); 4] = [
            (get_not_before, OperationTag::GetNotBefore),
            (get_not_after, OperationTag::GetNotAfter),
            (get_subject_dn, OperationTag::GetSubjectDn),
            (get_issuer_dn, OperationTag::GetIssuerDn),
        ];

        for (builder, expected_tag) in builders {
            let (frame, tag) = builder("a", "/p", "key1", "pw").unwrap();
            assert_eq!(tag, expected_tag);
            assert_eq!(frame.method, expected_tag.method());
            assert_eq!(
                frame.args,
                vec![
                    serde_json::json!("a"),
                    serde_json::json!("/p"),
                    serde_json::json!("key1"),
                    serde_json::json!("pw"),
                ]
            );
        }
    }

    #[test]
    fn test_get_rdn_by_oid_carries_integer_index_last() {
        let (frame, tag) = get_rdn_by_oid("a", "/p", "key1", "pw", "2.5.4.3", 1).unwrap();
        assert_eq!(tag, OperationTag::GetRdnByOid);
        assert_eq!(frame.args.len(), 6);
        assert_eq!(frame.args[4], serde_json::json!("2.5.4.3"));
        assert_eq!(frame.args[5], serde_json::json!(1));
    }

    #[test]
    fn test_get_rdn_by_oid_empty_oid_is_rejected() {
        let result = get_rdn_by_oid("a", "/p", "key1", "pw", "", 0);
        assert!(matches!(
            result,
            Err(CatalogError::MissingArgument { name: "oid", .. })
        ));
    }

    #[test]
    fn test_sign_plain_data_argument_order() {
        let (frame, tag) = sign_plain_data("a", "/p", "key1", "pw", "hello").unwrap();
        assert_eq!(tag, OperationTag::SignPlainData);
        assert_eq!(
            frame.args,
            vec![
                serde_json::json!("a"),
                serde_json::json!("/p"),
                serde_json::json!("key1"),
                serde_json::json!("pw"),
                serde_json::json!("hello"),
            ]
        );
    }

    #[test]
    fn test_verify_plain_data_requires_signature() {
        let result = verify_plain_data("a", "/p", "key1", "pw", "hello", "");
        assert!(matches!(
            result,
            Err(CatalogError::MissingArgument {
                name: "signature",
                ..
            })
        ));
    }

    #[test]
    fn test_verify_plain_data_argument_order() {
        let (frame, _) = verify_plain_data("a", "/p", "key1", "pw", "hello", "c2ln").unwrap();
        assert_eq!(frame.args[4], serde_json::json!("hello"));
        assert_eq!(frame.args[5], serde_json::json!("c2ln"));
    }
}
