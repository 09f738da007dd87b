use std::sync::{Arc, Mutex};

use serde_json::{Value, json};

use cellbase_client::client::RestClient;
use cellbase_client::config::ClientConfiguration;
use cellbase_client::error::ClientError;
use cellbase_client::model::{QueryResponse, QueryResult};
use cellbase_client::options::{Query, QueryOptions};
use cellbase_client::transport::{RequestContext, Transport};

type CallJournal = Arc<Mutex<Vec<(Vec<String>, String, QueryOptions)>>>;

struct DispatchBackend {
    calls: CallJournal,
}

impl DispatchBackend {
    fn new() -> (Self, CallJournal) {
        let calls: CallJournal = Arc::new(Mutex::new(Vec::new()));
        (Self { calls: calls.clone() }, calls)
    }

    fn journal(&self, ids: &[String], resource: &str, options: &QueryOptions) {
        self.calls
            .lock()
            .unwrap()
            .push((ids.to_vec(), resource.to_string(), options.clone()));
    }
}

impl Transport<Value> for DispatchBackend {
    fn call(
        &self,
        _context: &RequestContext,
        ids: &[String],
        resource: &str,
        options: &QueryOptions,
    ) -> Result<QueryResponse<Value>, ClientError> {
        self.journal(ids, resource, options);
        let response = if ids.is_empty() {
            vec![QueryResult {
                id: None,
                db_time: None,
                num_results: 1,
                num_total_results: 1,
                result: vec![json!({ "resource": resource })],
            }]
        } else {
            ids.iter()
                .map(|id| QueryResult {
                    id: Some(id.clone()),
                    db_time: None,
                    num_results: 1,
                    num_total_results: 1,
                    result: vec![json!({ "id": id })],
                })
                .collect()
        };
        Ok(QueryResponse {
            response,
            ..QueryResponse::default()
        })
    }
}

impl Transport<u64> for DispatchBackend {
    fn call(
        &self,
        _context: &RequestContext,
        ids: &[String],
        resource: &str,
        options: &QueryOptions,
    ) -> Result<QueryResponse<u64>, ClientError> {
        self.journal(ids, resource, options);
        Ok(QueryResponse {
            response: vec![QueryResult {
                id: None,
                db_time: None,
                num_results: 1,
                num_total_results: 1,
                result: vec![42],
            }],
            ..QueryResponse::default()
        })
    }
}

fn gene_client(backend: DispatchBackend) -> RestClient<DispatchBackend> {
    let configuration = ClientConfiguration::new(
        vec!["http://localhost:8080/cellbase".to_string()],
        "v4",
        "hsapiens",
    )
    .unwrap();
    RestClient::new(&configuration, "hsapiens", "feature", "gene", backend)
}

#[test]
fn get_uses_info_and_preserves_order() {
    let (backend, calls) = DispatchBackend::new();
    let client = gene_client(backend);
    let ids = vec!["BRCA2".to_string(), "TP53".to_string()];

    let response: QueryResponse<Value> = client.get(&ids, &QueryOptions::new()).unwrap();

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, ids);
    assert_eq!(calls[0].1, "info");
    assert_eq!(calls[0].2.limit, Some(1000));

    assert_eq!(response.response.len(), 2);
    assert_eq!(response.response[0].id.as_deref(), Some("BRCA2"));
    assert_eq!(response.response[1].id.as_deref(), Some("TP53"));
}

#[test]
fn get_keeps_caller_options() {
    let (backend, calls) = DispatchBackend::new();
    let client = gene_client(backend);
    let options = QueryOptions::new().with_limit(10).with_include("id,name");

    let _: QueryResponse<Value> = client.get(&["BRCA2".to_string()], &options).unwrap();

    let calls = calls.lock().unwrap();
    assert_eq!(calls[0].2.limit, Some(10));
    assert_eq!(calls[0].2.include.as_deref(), Some("id,name"));
}

#[test]
fn count_folds_filter_into_options() {
    let (backend, calls) = DispatchBackend::new();
    let client = gene_client(backend);
    let query = Query::new().with("biotype", "protein_coding");

    let response = client.count(&query).unwrap();

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].0.is_empty());
    assert_eq!(calls[0].1, "count");
    assert_eq!(calls[0].2.extra.get("biotype").unwrap(), "protein_coding");

    assert_eq!(response.first_result().unwrap().result, vec![42]);
}

#[test]
fn first_probes_the_first_resource() {
    let (backend, calls) = DispatchBackend::new();
    let client = gene_client(backend);

    let response: QueryResponse<Value> = client.first().unwrap();

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].0.is_empty());
    assert_eq!(calls[0].1, "first");
    assert_eq!(response.response.len(), 1);
}
