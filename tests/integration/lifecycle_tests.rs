//! Request lifecycle integration tests
//!
//! Drives registration, engine updates, completion, report generation and
//! cancellation through the public [`BatchManager`] API.

#[cfg(test)]
mod tests {
    use crate::common::{DomainFactory, TestStorage};
    use async_trait::async_trait;
    use hygiene_batch::config::BatchConfig;
    use hygiene_batch::core::batch::{
        BatchDomainStatus, BatchManager, BatchRequestStatus, DomainResult, Report,
        ReportGenerator, ReportMetadataSource, ReportOutcome, RequestType, SubmissionLimiter,
    };
    use hygiene_batch::storage::reports::report_key;
    use hygiene_batch::utils::error::{BatchError, Result};
    use std::sync::Arc;
    use std::time::Duration;

    async fn complete(manager: &BatchManager, request_id: &str, domain: &str, to: BatchDomainStatus) {
        manager
            .record_result(request_id, domain, BatchDomainStatus::Running, None)
            .await
            .unwrap();
        let result = DomainResult {
            web: Some(serde_json::json!({ "domain": domain })),
            mail: Some(serde_json::json!({ "dmarc": true })),
        };
        manager
            .record_result(request_id, domain, to, Some(result))
            .await
            .unwrap();
    }

    async fn wait_for_report(manager: &BatchManager, owner: &str, request_id: &str) -> Report {
        for _ in 0..200 {
            if let ReportOutcome::Ready(report) = manager.results(owner, request_id).await.unwrap() {
                return report;
            }
            tokio::time::sleep(Duration::from_millis(25)).await;
        }
        panic!("report for {} never became available", request_id);
    }

    #[tokio::test]
    async fn test_large_request_reaches_done_with_full_report() {
        let storage = TestStorage::in_memory().await;
        let manager = storage.manager(&BatchConfig::default());
        let domains = DomainFactory::many(50);

        let request = manager
            .register("alice", "nightly", RequestType::Mail, &domains)
            .await
            .unwrap();

        for (i, domain) in domains.iter().enumerate() {
            let to = if i % 10 == 0 {
                BatchDomainStatus::Error
            } else {
                BatchDomainStatus::Done
            };
            complete(&manager, &request.request_id, domain, to).await;

            let progress = manager.progress("alice", &request.request_id).await.unwrap();
            assert_eq!(progress.finished, i as u64 + 1);
            assert_eq!(progress.total, 50);
        }

        let stored = manager.get("alice", &request.request_id).await.unwrap();
        assert_eq!(stored.status, BatchRequestStatus::Done);
        assert!(stored.finished_at.is_some());

        let report = wait_for_report(&manager, "alice", &request.request_id).await;
        assert_eq!(report.domains.len(), 50);
        assert_eq!(report.request.request_type, RequestType::Mail);
        let errors = report
            .domains
            .values()
            .filter(|d| d.status == BatchDomainStatus::Error)
            .count();
        assert_eq!(errors, 5);

        let path = storage.reports_dir().join(report_key(&request.request_id));
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_regeneration_is_byte_identical() {
        let storage = TestStorage::in_memory().await;
        let manager = storage.manager(&BatchConfig::default());
        let domains = DomainFactory::of(&["b.example", "a.example", "c.example"]);

        let request = manager
            .register("alice", "stable", RequestType::Web, &domains)
            .await
            .unwrap();
        for domain in &domains {
            complete(&manager, &request.request_id, domain, BatchDomainStatus::Done).await;
        }

        let generator = ReportGenerator::new(storage.db(), storage.storage().reports.clone());
        let first = generator.generate(&request.request_id).await.unwrap().unwrap();
        let second = generator.generate(&request.request_id).await.unwrap().unwrap();
        assert_eq!(first, second);

        let report = generator.load(&first.key).await.unwrap();
        let keys: Vec<_> = report.domains.keys().cloned().collect();
        assert_eq!(keys, vec!["a.example", "b.example", "c.example"]);
    }

    #[tokio::test]
    async fn test_cancel_mid_run_stops_everything() {
        let storage = TestStorage::in_memory().await;
        let manager = storage.manager(&BatchConfig::default());
        let domains = DomainFactory::many(4);

        let request = manager
            .register("alice", "aborted", RequestType::Web, &domains)
            .await
            .unwrap();
        complete(&manager, &request.request_id, &domains[0], BatchDomainStatus::Done).await;

        manager.cancel("alice", &request.request_id).await.unwrap();

        let late = manager
            .record_result(&request.request_id, &domains[1], BatchDomainStatus::Running, None)
            .await;
        assert!(matches!(late, Err(BatchError::IllegalTransition { .. })));

        let stored = manager.get("alice", &request.request_id).await.unwrap();
        assert_eq!(stored.status, BatchRequestStatus::Cancelled);

        let outcome = manager.results("alice", &request.request_id).await.unwrap();
        assert_eq!(outcome, ReportOutcome::Pending);

        let generator = ReportGenerator::new(storage.db(), storage.storage().reports.clone());
        assert!(generator.generate(&request.request_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_owners_are_isolated() {
        let storage = TestStorage::in_memory().await;
        let manager = storage.manager(&BatchConfig::default());

        let request = manager
            .register("alice", "private", RequestType::Web, &DomainFactory::many(1))
            .await
            .unwrap();

        for result in [
            manager.get("bob", &request.request_id).await.map(|_| ()),
            manager.cancel("bob", &request.request_id).await,
            manager.results("bob", &request.request_id).await.map(|_| ()),
            manager.progress("bob", &request.request_id).await.map(|_| ()),
        ] {
            assert!(matches!(result, Err(BatchError::NotFound(_))));
        }

        let stored = manager.get("alice", &request.request_id).await.unwrap();
        assert_eq!(stored.status, BatchRequestStatus::Live);
    }

    #[derive(Debug)]
    struct ClosedForMaintenance;

    #[async_trait]
    impl SubmissionLimiter for ClosedForMaintenance {
        async fn check(&self, owner: &str) -> Result<()> {
            Err(BatchError::quota(format!("{} must wait", owner)))
        }
    }

    #[derive(Debug)]
    struct EmptyMetadata;

    impl ReportMetadataSource for EmptyMetadata {
        fn report_metadata(&self) -> serde_json::Value {
            serde_json::json!({})
        }
    }

    #[tokio::test]
    async fn test_pluggable_limiter_and_metadata() {
        let storage = TestStorage::in_memory().await;
        let manager = storage
            .manager(&BatchConfig::default())
            .with_limiter(Arc::new(ClosedForMaintenance))
            .with_metadata(Arc::new(EmptyMetadata));

        let rejected = manager
            .register("alice", "blocked", RequestType::Web, &DomainFactory::many(1))
            .await;
        assert!(matches!(rejected, Err(BatchError::Quota(_))));
        assert!(manager.list("alice", Some(0)).await.unwrap().is_empty());

        assert_eq!(manager.list_metadata(), serde_json::json!({}));
    }

    #[tokio::test]
    async fn test_default_list_limit_applies() {
        let storage = TestStorage::in_memory().await;
        let config = BatchConfig {
            default_list_limit: 2,
            ..BatchConfig::default()
        };
        let manager = storage.manager(&config);

        for i in 0..3 {
            manager
                .register("alice", &format!("r{}", i), RequestType::Web, &DomainFactory::many(1))
                .await
                .unwrap();
        }

        assert_eq!(manager.list("alice", None).await.unwrap().len(), 2);
        assert_eq!(manager.list("alice", Some(0)).await.unwrap().len(), 3);
        assert_eq!(manager.list("alice", Some(1)).await.unwrap().len(), 1);
    }
}
