//! Database integration tests
//!
//! Runs the persistence operations against a file-backed SQLite database with
//! several pooled connections, so conditional updates really race.

#[cfg(test)]
mod tests {
    use crate::common::{DomainFactory, TestStorage};
    use chrono::Utc;
    use hygiene_batch::config::BatchConfig;
    use hygiene_batch::core::batch::{
        BatchDomainStatus, BatchRequest, BatchRequestStatus, DomainResult, RequestType,
    };
    use hygiene_batch::storage::database::Database;
    use hygiene_batch::utils::error::BatchError;
    use std::sync::Arc;

    async fn live_request(db: &Database, owner: &str, domains: &[String]) -> BatchRequest {
        let request = BatchRequest {
            request_id: uuid::Uuid::new_v4().simple().to_string(),
            owner: owner.to_string(),
            name: "integration".to_string(),
            request_type: RequestType::Web,
            status: BatchRequestStatus::Live,
            submitted_at: Utc::now(),
            finished_at: None,
            report_file: None,
        };
        db.insert_request(&request).await.unwrap();
        db.insert_domain_jobs(&request.request_id, domains).await.unwrap();
        request
    }

    #[tokio::test]
    async fn test_file_backed_database_is_healthy() {
        let storage = TestStorage::file_backed().await;
        assert!(storage.storage().health_check().await.overall);

        let db = storage.db();
        live_request(&db, "alice", &DomainFactory::many(3)).await;
        let stats = db.stats().await.unwrap();
        assert_eq!(stats.total_requests, 1);
        assert_eq!(stats.total_domains, 3);
    }

    #[tokio::test]
    async fn test_concurrent_updates_to_distinct_jobs_all_land() {
        let storage = TestStorage::file_backed().await;
        let db = storage.db();
        let request = live_request(&db, "alice", &DomainFactory::many(40)).await;
        let jobs = db.list_domain_jobs(&request.request_id).await.unwrap();

        let mut handles = Vec::new();
        for job in jobs {
            let db: Arc<Database> = Arc::clone(&db);
            handles.push(tokio::spawn(async move {
                db.update_domain_status(&job.id, BatchDomainStatus::Running, None)
                    .await
                    .unwrap();
                let result = DomainResult {
                    web: Some(serde_json::json!({ "domain": job.domain })),
                    mail: None,
                };
                db.update_domain_status(&job.id, BatchDomainStatus::Done, Some(&result))
                    .await
                    .unwrap()
            }));
        }

        for handle in handles {
            assert_eq!(handle.await.unwrap(), 1);
        }

        let counts = db.count_domains_by_status(&request.request_id).await.unwrap();
        assert_eq!(counts, vec![(BatchDomainStatus::Done, 40)]);
        assert!(db.mark_done_if_finished(&request.request_id).await.unwrap());
        assert!(!db.mark_done_if_finished(&request.request_id).await.unwrap());
    }

    #[tokio::test]
    async fn test_racing_terminal_updates_have_one_winner() {
        let storage = TestStorage::file_backed().await;
        let db = storage.db();
        let request = live_request(&db, "alice", &DomainFactory::of(&["race.example"])).await;
        let job = db
            .find_domain_job_by_name(&request.request_id, "race.example")
            .await
            .unwrap()
            .unwrap();
        db.update_domain_status(&job.id, BatchDomainStatus::Running, None)
            .await
            .unwrap();

        let mut handles = Vec::new();
        for i in 0..8 {
            let db = Arc::clone(&db);
            let id = job.id.clone();
            let to = if i % 2 == 0 {
                BatchDomainStatus::Done
            } else {
                BatchDomainStatus::Error
            };
            handles.push(tokio::spawn(async move {
                db.update_domain_status(&id, to, None).await.unwrap()
            }));
        }

        let mut applied = 0;
        for handle in handles {
            applied += handle.await.unwrap();
        }
        assert_eq!(applied, 1);

        let job = db.find_domain_job(&job.id).await.unwrap().unwrap();
        assert!(job.status.is_terminal());
    }

    #[tokio::test]
    async fn test_cancel_beats_late_engine_updates() {
        let storage = TestStorage::file_backed().await;
        let db = storage.db();
        let request = live_request(&db, "alice", &DomainFactory::many(5)).await;
        let jobs = db.list_domain_jobs(&request.request_id).await.unwrap();

        assert_eq!(db.cancel_request(&request.request_id).await.unwrap(), 5);

        for job in &jobs {
            let rows = db
                .update_domain_status(&job.id, BatchDomainStatus::Running, None)
                .await
                .unwrap();
            assert_eq!(rows, 0);
        }

        let stored = db.find_request_by_id(&request.request_id).await.unwrap().unwrap();
        assert_eq!(stored.status, BatchRequestStatus::Cancelled);
        assert!(stored.finished_at.is_some());
        assert!(!db.mark_done_if_finished(&request.request_id).await.unwrap());
    }

    #[tokio::test]
    async fn test_listing_is_newest_first_and_owner_scoped() {
        let storage = TestStorage::file_backed().await;
        let db = storage.db();

        let first = live_request(&db, "alice", &DomainFactory::many(1)).await;
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = live_request(&db, "alice", &DomainFactory::many(1)).await;
        live_request(&db, "bob", &DomainFactory::many(1)).await;

        let listed = db.list_requests(Some("alice"), None).await.unwrap();
        let ids: Vec<_> = listed.iter().map(|r| r.request_id.as_str()).collect();
        assert_eq!(ids, vec![second.request_id.as_str(), first.request_id.as_str()]);

        assert_eq!(db.list_requests(Some("alice"), Some(1)).await.unwrap().len(), 1);
        assert_eq!(db.list_requests(None, None).await.unwrap().len(), 3);
        assert!(db.find_request("bob", &first.request_id).await.unwrap().is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_parallel_final_updates_all_succeed() {
        let storage = TestStorage::file_backed().await;
        let manager = storage.manager(&BatchConfig::default());
        let domains = DomainFactory::many(8);

        for round in 0..20 {
            let request = manager
                .register("alice", &format!("round {}", round), RequestType::Web, &domains)
                .await
                .unwrap();
            for domain in &domains {
                manager
                    .record_result(&request.request_id, domain, BatchDomainStatus::Running, None)
                    .await
                    .unwrap();
            }

            let mut handles = Vec::new();
            for domain in domains.clone() {
                let manager = manager.clone();
                let request_id = request.request_id.clone();
                handles.push(tokio::spawn(async move {
                    manager
                        .record_result(&request_id, &domain, BatchDomainStatus::Done, None)
                        .await
                }));
            }

            for handle in handles {
                let outcome = handle.await.unwrap();
                assert!(outcome.is_ok(), "round {}: {:?}", round, outcome.err());
            }

            let stored = manager.get("alice", &request.request_id).await.unwrap();
            assert_eq!(stored.status, BatchRequestStatus::Done, "round {}", round);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_cancel_racing_completion_never_hits_lock_errors() {
        let storage = TestStorage::file_backed().await;
        let manager = storage.manager(&BatchConfig::default());
        let domains = DomainFactory::many(8);

        for round in 0..10 {
            let request = manager
                .register("alice", &format!("round {}", round), RequestType::Web, &domains)
                .await
                .unwrap();
            for domain in &domains {
                manager
                    .record_result(&request.request_id, domain, BatchDomainStatus::Running, None)
                    .await
                    .unwrap();
            }

            let canceller = {
                let manager = manager.clone();
                let request_id = request.request_id.clone();
                tokio::spawn(async move { manager.cancel("alice", &request_id).await })
            };
            let mut handles = Vec::new();
            for domain in domains.clone() {
                let manager = manager.clone();
                let request_id = request.request_id.clone();
                handles.push(tokio::spawn(async move {
                    manager
                        .record_result(&request_id, &domain, BatchDomainStatus::Done, None)
                        .await
                }));
            }

            canceller.await.unwrap().unwrap();
            for handle in handles {
                // a job cancelled first rejects the late update as illegal
                if let Err(e) = handle.await.unwrap() {
                    assert!(matches!(e, BatchError::IllegalTransition { .. }), "round {}: {}", round, e);
                }
            }

            let stored = manager.get("alice", &request.request_id).await.unwrap();
            assert_eq!(stored.status, BatchRequestStatus::Cancelled, "round {}", round);
        }
    }
}
