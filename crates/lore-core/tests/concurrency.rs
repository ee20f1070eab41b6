//! Concurrent writers racing on shared agent documents

use futures::future::join_all;
use lore_core::error::LoreResult;
use lore_core::memory::MemoryRepository;
use lore_core::{AgentId, MemoryConfig, MemoryService};
use std::time::Duration;
use tempfile::TempDir;

const WRITERS: usize = 32;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn stress_config(dir: &TempDir) -> MemoryConfig {
    MemoryConfig::with_memories_dir(dir.path())
        .max_items_per_section(WRITERS * 2)
        .lock_timeout(Duration::from_secs(30))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_no_lost_updates_on_one_agent() -> LoreResult<()> {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let service = MemoryService::with_file_storage(stress_config(&dir))?;

    let handles = (0..WRITERS).map(|i| {
        let service = service.clone();
        tokio::spawn(async move {
            service
                .add_learning_to_section("qa", "Stress", &format!("fact {i} about subsystem z{i}"))
                .await
        })
    });

    for result in join_all(handles).await {
        let outcome = result.expect("writer task panicked")?;
        assert!(outcome.is_inserted(), "unexpected outcome: {outcome:?}");
    }

    let doc = service.load("qa").await?;
    assert_eq!(doc.section("Stress").unwrap().items.len(), WRITERS);
    for i in 0..WRITERS {
        assert!(doc.contains(&format!("fact {i} about subsystem z{i}")));
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_agents_write_independently() -> LoreResult<()> {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let service = MemoryService::with_file_storage(stress_config(&dir))?;
    let agents = ["qa", "engineer", "research", "ops"];

    let handles = agents.iter().flat_map(|agent| {
        let service = service.clone();
        (0..8).map(move |i| {
            let service = service.clone();
            let agent = agent.to_string();
            tokio::spawn(async move {
                service
                    .add_learning_to_section(&agent, "Stress", &format!("{agent} note {i} w{i}"))
                    .await
            })
        })
    });

    for result in join_all(handles).await {
        assert!(result.expect("writer task panicked")?.is_inserted());
    }

    let listed = service.list_agents().await?;
    assert_eq!(listed.len(), agents.len());
    for agent in agents {
        assert_eq!(service.load(agent).await?.item_count(), 8);
    }
    Ok(())
}

#[tokio::test]
async fn test_held_lock_times_out_only_its_agent() -> LoreResult<()> {
    let dir = TempDir::new().unwrap();
    let config =
        MemoryConfig::with_memories_dir(dir.path()).lock_timeout(Duration::from_millis(100));
    let service = MemoryService::with_file_storage(config)?;

    let qa = AgentId::parse("qa")?;
    let _held = service.repository().lock(&qa).await?;

    let err = service
        .add_learning("qa", "Always assert exit codes in shell tests")
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "LOCK_TIMEOUT");
    assert!(err.is_retryable());

    let other = service
        .add_learning("engineer", "Always assert exit codes in shell tests")
        .await?;
    assert!(other.is_inserted());
    Ok(())
}
