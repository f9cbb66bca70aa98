//! Permission provisioning operations.
//!
//! These functions drive a [`Session`] through the straight-line flow of
//! creating a permission set and assigning field permissions under it.
//! Nothing is handled or retried locally: every failure is logged once at
//! the point of detection and returned unchanged.

use tracing::{debug, error, info, instrument};

use crate::error::ApiFailure;
use crate::sobjects::{
    ApiFault, FIELD_PERMISSIONS, FieldPermission, PERMISSION_SET, PermissionSet,
    PermissionSetRecord, RecordTypeInfo,
};
use crate::traits::Session;
use crate::types::{AccessLevel, ObjectId};
use crate::Result;

/// Create a permission set for an object/record-type pair.
///
/// Synthesizes the name, label, and description from the pair and issues a
/// single create call. Returns the server-assigned id. No de-duplication
/// check is performed; creating the same pair twice is a server-side
/// concern.
///
/// # Errors
///
/// Propagates any transport or REST error from the session unchanged. A
/// structurally successful response with `success: false` is surfaced as an
/// API failure carrying the server's error list.
#[instrument(skip(session))]
pub async fn create_permission_set<S>(
    session: &S,
    object_name: &str,
    record_type: &str,
) -> Result<ObjectId>
where
    S: Session + ?Sized,
{
    let payload = PermissionSet::for_record_type(object_name, record_type)?;
    info!(name = %payload.name, "Creating permission set");

    let record = serde_json::to_value(&payload).expect("permission set serializes to JSON");

    let result = match session.create(PERMISSION_SET, &record).await {
        Ok(result) => result,
        Err(e) => {
            error!(error = %e, "Error creating permission set");
            return Err(e);
        }
    };

    if !result.success {
        let failure = ApiFailure::new(
            format!("{} {}", PERMISSION_SET, payload.name),
            result.errors,
        );
        error!(error = %failure, "Error creating permission set");
        return Err(failure.into());
    }

    let Some(id) = result.id else {
        let failure = ApiFailure::new(
            format!("{} {}", PERMISSION_SET, payload.name),
            Vec::new(),
        );
        error!(error = %failure, "Create reported success without an id");
        return Err(failure.into());
    };

    info!(name = %payload.name, id = %id, "Permission set created");
    Ok(id)
}

/// Create an edit permission set for an object.
///
/// Convenience composition of [`create_permission_set`] with the record
/// type fixed to `"edit"`.
pub async fn create_edit_permission_set<S>(session: &S, object_name: &str) -> Result<ObjectId>
where
    S: Session + ?Sized,
{
    create_permission_set(session, object_name, "edit").await
}

/// Assign field permissions under a permission set.
///
/// Iterates the field list sequentially, issuing one create call per field
/// in input order. The first field whose create reports failure aborts the
/// loop immediately; fields already processed remain created on the remote
/// side. There is no rollback.
///
/// `parent_id` is the permission set's record id, used as the `ParentId` of
/// every field permission.
#[instrument(skip(session, fields))]
pub async fn set_field_permissions<S, F>(
    session: &S,
    parent_id: &ObjectId,
    object_name: &str,
    fields: &[F],
    access_level: AccessLevel,
) -> Result<()>
where
    S: Session + ?Sized,
    F: AsRef<str>,
{
    info!(
        count = fields.len(),
        object = object_name,
        level = %access_level,
        "Setting field permissions"
    );

    for field in fields {
        let field = field.as_ref();
        let payload = FieldPermission::new(parent_id, object_name, field, access_level);
        let record = serde_json::to_value(&payload).expect("field permission serializes to JSON");

        let result = match session.create(FIELD_PERMISSIONS, &record).await {
            Ok(result) => result,
            Err(e) => {
                error!(field, error = %e, "Error setting field permissions");
                return Err(e);
            }
        };

        if !result.success {
            let failure = ApiFailure::new(
                format!("field permission {}", payload.field),
                result.errors,
            );
            error!(field, error = %failure, "Error setting field permissions");
            return Err(failure.into());
        }

        debug!(field, "Field permission set");
    }

    info!("Permissions for all fields set");
    Ok(())
}

/// Look up a permission set by its API name.
///
/// Returns `None` when no permission set with that name exists.
#[instrument(skip(session))]
pub async fn find_permission_set<S>(
    session: &S,
    name: &str,
) -> Result<Option<PermissionSetRecord>>
where
    S: Session + ?Sized,
{
    let soql = format!("SELECT Id, Name FROM PermissionSet WHERE Name = '{}'", name);

    let result = match session.query(&soql).await {
        Ok(result) => result,
        Err(e) => {
            error!(error = %e, "Error checking permission set existence");
            return Err(e);
        }
    };

    if result.total_size == 0 {
        return Ok(None);
    }

    let record = result
        .records
        .into_iter()
        .next()
        .map(serde_json::from_value::<PermissionSetRecord>)
        .transpose()
        .map_err(|e| {
            let failure = ApiFailure::new(
                format!("{} query for {}", PERMISSION_SET, name),
                vec![ApiFault {
                    status_code: None,
                    message: format!("unexpected record shape: {}", e),
                    fields: Vec::new(),
                }],
            );
            error!(error = %failure, "Error checking permission set existence");
            crate::Error::from(failure)
        })?;

    Ok(record)
}

/// List the record types declared for an object.
#[instrument(skip(session))]
pub async fn record_types<S>(session: &S, object_name: &str) -> Result<Vec<RecordTypeInfo>>
where
    S: Session + ?Sized,
{
    let soql = format!(
        "SELECT Id, Name, DeveloperName FROM RecordType WHERE SObjectType = '{}'",
        object_name
    );

    let result = match session.query(&soql).await {
        Ok(result) => result,
        Err(e) => {
            error!(error = %e, "Error getting record types");
            return Err(e);
        }
    };

    result
        .records
        .into_iter()
        .map(|record| {
            serde_json::from_value::<RecordTypeInfo>(record).map_err(|e| {
                let failure = ApiFailure::new(
                    format!("RecordType query for {}", object_name),
                    vec![ApiFault {
                        status_code: None,
                        message: format!("unexpected record shape: {}", e),
                        fields: Vec::new(),
                    }],
                );
                error!(error = %failure, "Error getting record types");
                crate::Error::from(failure)
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::{Value, json};

    use crate::error::Error;
    use crate::sobjects::{ApiFault, ApiUsage, CreateResult, ObjectDescribe, QueryResult, SObjectSummary};
    use crate::types::{InstanceUrl, SessionId};

    const PARENT_ID: &str = "0PS5e000001Sv2PGAS";

    /// Scripted session double: records every call, replays queued results.
    struct MockSession {
        instance: InstanceUrl,
        calls: Mutex<Vec<(String, Value)>>,
        create_results: Mutex<VecDeque<CreateResult>>,
        query_results: Mutex<VecDeque<QueryResult>>,
        queries: Mutex<Vec<String>>,
    }

    impl MockSession {
        fn new(create_results: Vec<CreateResult>) -> Self {
            Self {
                instance: InstanceUrl::new("http://127.0.0.1:1").unwrap(),
                calls: Mutex::new(Vec::new()),
                create_results: Mutex::new(create_results.into()),
                query_results: Mutex::new(VecDeque::new()),
                queries: Mutex::new(Vec::new()),
            }
        }

        fn with_query_results(query_results: Vec<QueryResult>) -> Self {
            let session = Self::new(Vec::new());
            *session.query_results.lock().unwrap() = query_results.into();
            session
        }

        fn calls(&self) -> Vec<(String, Value)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Session for MockSession {
        fn instance(&self) -> &InstanceUrl {
            &self.instance
        }

        fn session_id(&self) -> SessionId {
            SessionId::new("mock-session")
        }

        async fn create(&self, object_type: &str, record: &Value) -> Result<CreateResult> {
            self.calls
                .lock()
                .unwrap()
                .push((object_type.to_string(), record.clone()));
            Ok(self
                .create_results
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected create call"))
        }

        async fn query(&self, soql: &str) -> Result<QueryResult> {
            self.queries.lock().unwrap().push(soql.to_string());
            Ok(self
                .query_results
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected query call"))
        }

        async fn describe(&self, _object_name: &str) -> Result<ObjectDescribe> {
            unimplemented!("not exercised by these tests")
        }

        async fn describe_global(&self) -> Result<Vec<SObjectSummary>> {
            unimplemented!("not exercised by these tests")
        }

        async fn limits(&self) -> Result<ApiUsage> {
            unimplemented!("not exercised by these tests")
        }
    }

    fn created(id: &str) -> CreateResult {
        CreateResult {
            id: Some(ObjectId::new(id).unwrap()),
            success: true,
            errors: Vec::new(),
        }
    }

    fn rejected(code: &str, message: &str) -> CreateResult {
        CreateResult {
            id: None,
            success: false,
            errors: vec![ApiFault {
                status_code: Some(code.to_string()),
                message: message.to_string(),
                fields: Vec::new(),
            }],
        }
    }

    #[tokio::test]
    async fn create_permission_set_sends_derived_names() {
        let session = MockSession::new(vec![created(PARENT_ID)]);

        let id = create_permission_set(&session, "Account", "edit")
            .await
            .unwrap();
        assert_eq!(id.as_str(), PARENT_ID);

        let calls = session.calls();
        assert_eq!(calls.len(), 1);
        let (object_type, record) = &calls[0];
        assert_eq!(object_type, "PermissionSet");
        assert_eq!(record["Name"], "Account_edit_Permissions");
        assert_eq!(record["Label"], "Account edit Permissions");
        let description = record["Description"].as_str().unwrap();
        assert!(description.contains("Account"));
        assert!(description.contains("edit"));
    }

    #[tokio::test]
    async fn create_permission_set_surfaces_server_errors() {
        let session = MockSession::new(vec![rejected(
            "DUPLICATE_DEVELOPER_NAME",
            "That name is already in use",
        )]);

        let err = create_permission_set(&session, "Account", "basic")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Api(_)));
        let text = err.to_string();
        assert!(text.contains("DUPLICATE_DEVELOPER_NAME"));
        assert!(text.contains("That name is already in use"));
    }

    #[tokio::test]
    async fn create_permission_set_rejects_empty_object_name_locally() {
        let session = MockSession::new(Vec::new());

        let err = create_permission_set(&session, "", "basic").await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(session.calls().is_empty());
    }

    #[tokio::test]
    async fn edit_convenience_matches_explicit_record_type() {
        let session = MockSession::new(vec![created(PARENT_ID)]);

        create_edit_permission_set(&session, "Account").await.unwrap();

        let calls = session.calls();
        assert_eq!(calls[0].1["Name"], "Account_edit_Permissions");
    }

    #[tokio::test]
    async fn field_permissions_issue_one_create_per_field_in_order() {
        let session = MockSession::new(vec![created(PARENT_ID), created(PARENT_ID)]);
        let parent = ObjectId::new(PARENT_ID).unwrap();

        set_field_permissions(
            &session,
            &parent,
            "Contact",
            &["Email", "Phone"],
            AccessLevel::Edit,
        )
        .await
        .unwrap();

        let calls = session.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].0, "FieldPermissions");
        assert_eq!(calls[0].1["Field"], "Contact.Email");
        assert_eq!(calls[1].1["Field"], "Contact.Phone");
        for (_, record) in &calls {
            assert_eq!(record["PermissionsRead"], true);
            assert_eq!(record["PermissionsEdit"], true);
            assert_eq!(record["ParentId"], PARENT_ID);
        }
    }

    #[tokio::test]
    async fn invalid_access_level_never_reaches_the_session() {
        let session = MockSession::new(Vec::new());

        // Level strings are validated at parse, before any session call can
        // be issued with them.
        let result = "bogus".parse::<AccessLevel>();
        assert!(matches!(
            result,
            Err(Error::InvalidInput(crate::error::InvalidInputError::AccessLevel { .. }))
        ));
        assert!(session.calls().is_empty());
    }

    #[tokio::test]
    async fn read_level_still_sets_permissions_read() {
        let session = MockSession::new(vec![created(PARENT_ID)]);
        let parent = ObjectId::new(PARENT_ID).unwrap();

        set_field_permissions(&session, &parent, "Contact", &["Email"], AccessLevel::Read)
            .await
            .unwrap();

        let calls = session.calls();
        assert_eq!(calls[0].1["PermissionsRead"], true);
        assert_eq!(calls[0].1["PermissionsEdit"], false);
    }

    #[tokio::test]
    async fn first_failure_aborts_remaining_fields() {
        let session = MockSession::new(vec![
            created(PARENT_ID),
            rejected("FIELD_INTEGRITY_EXCEPTION", "No such field"),
        ]);
        let parent = ObjectId::new(PARENT_ID).unwrap();

        let err = set_field_permissions(
            &session,
            &parent,
            "Contact",
            &["Email", "Bogus__c", "Phone"],
            AccessLevel::Read,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, Error::Api(_)));
        assert!(err.to_string().contains("Contact.Bogus__c"));

        // The first field was committed before the failure; the third was
        // never attempted.
        let calls = session.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].1["Field"], "Contact.Email");
        assert_eq!(calls[1].1["Field"], "Contact.Bogus__c");
    }

    #[tokio::test]
    async fn find_permission_set_returns_match() {
        let session = MockSession::with_query_results(vec![QueryResult {
            total_size: 1,
            done: true,
            records: vec![json!({"Id": PARENT_ID, "Name": "Account_basic_Permissions"})],
        }]);

        let found = find_permission_set(&session, "Account_basic_Permissions")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id.as_str(), PARENT_ID);
        assert_eq!(found.name, "Account_basic_Permissions");

        let queries = session.queries.lock().unwrap().clone();
        assert_eq!(
            queries[0],
            "SELECT Id, Name FROM PermissionSet WHERE Name = 'Account_basic_Permissions'"
        );
    }

    #[tokio::test]
    async fn find_permission_set_returns_none_when_absent() {
        let session = MockSession::with_query_results(vec![QueryResult {
            total_size: 0,
            done: true,
            records: Vec::new(),
        }]);

        let found = find_permission_set(&session, "Missing_Permissions")
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn record_types_decode_query_records() {
        let session = MockSession::with_query_results(vec![QueryResult {
            total_size: 2,
            done: true,
            records: vec![
                json!({"Id": "0125e000000FakeAAA", "Name": "Basic", "DeveloperName": "Basic"}),
                json!({"Id": "0125e000000FakeBBB", "Name": "Edit", "DeveloperName": "Edit"}),
            ],
        }]);

        let types = record_types(&session, "Order").await.unwrap();
        assert_eq!(types.len(), 2);
        assert_eq!(types[0].developer_name, "Basic");
        assert_eq!(types[1].developer_name, "Edit");
    }
}
