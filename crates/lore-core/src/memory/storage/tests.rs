//! Storage tests

#[cfg(test)]
mod tests {
    use crate::error::LoreError;
    use crate::memory::sections::serialize;
    use crate::memory::storage::file_storage::replace_file;
    use crate::memory::storage::{
        FileMemoryRepository, InMemoryRepository, MemoryRepository, MemoryStorageError,
    };
    use crate::memory::types::{AgentId, Item, MemoryDocument};
    use std::time::Duration;
    use tempfile::TempDir;

    fn sections() -> Vec<String> {
        vec!["Testing".to_string(), "Recent Learnings".to_string()]
    }

    fn repo(dir: &TempDir) -> FileMemoryRepository {
        FileMemoryRepository::new(dir.path(), sections(), Duration::from_millis(200))
    }

    fn agent(id: &str) -> AgentId {
        AgentId::parse(id).unwrap()
    }

    #[tokio::test]
    async fn test_missing_file_loads_template() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);

        let doc = repo.load(&agent("qa")).await.unwrap();
        assert_eq!(doc.header, vec!["# Qa Agent Memory"]);
        assert_eq!(doc.sections.len(), 2);
        assert_eq!(doc.source_path, Some(dir.path().join("qa_memories.md")));
        // loading alone never writes
        assert!(!dir.path().join("qa_memories.md").exists());
    }

    #[tokio::test]
    async fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);
        let qa = agent("qa");

        let lock = repo.lock(&qa).await.unwrap();
        let mut doc = repo.load(&qa).await.unwrap();
        doc.section_mut_or_insert("Testing")
            .items
            .push(Item::new("Always assert exit codes"));
        repo.save(&lock, &doc).await.unwrap();
        drop(lock);

        let on_disk = std::fs::read_to_string(dir.path().join("qa_memories.md")).unwrap();
        assert_eq!(on_disk, serialize(&doc));

        let reloaded = repo.load(&qa).await.unwrap();
        assert_eq!(reloaded, doc);
    }

    #[tokio::test]
    async fn test_save_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);
        let qa = agent("qa");

        for _ in 0..3 {
            let lock = repo.lock(&qa).await.unwrap();
            let doc = repo.load(&qa).await.unwrap();
            repo.save(&lock, &doc).await.unwrap();
        }

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["qa_memories.md".to_string()]);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_backed_up() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);
        let path = dir.path().join("qa_memories.md");
        std::fs::write(&path, [0xff, 0xfe, 0x00, 0x41]).unwrap();

        let doc = repo.load(&agent("qa")).await.unwrap();
        assert_eq!(doc.item_count(), 0);
        assert_eq!(doc.sections.len(), 2);

        // original untouched, plus one backup copy
        assert_eq!(std::fs::read(&path).unwrap(), vec![0xff, 0xfe, 0x00, 0x41]);
        let backups: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.file_name()
                    .to_string_lossy()
                    .starts_with("qa_memories.md.corrupt-")
            })
            .collect();
        assert_eq!(backups.len(), 1);
    }

    #[tokio::test]
    async fn test_repeated_loads_keep_one_backup() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);
        std::fs::write(dir.path().join("qa_memories.md"), "garbage\n").unwrap();

        for _ in 0..3 {
            repo.load(&agent("qa")).await.unwrap();
            tokio::time::sleep(Duration::from_millis(1100)).await;
        }
        assert_eq!(count_backups(&dir, "qa"), 1);

        // different corrupt content gets its own copy
        std::fs::write(dir.path().join("qa_memories.md"), "other garbage\n").unwrap();
        repo.load(&agent("qa")).await.unwrap();
        assert_eq!(count_backups(&dir, "qa"), 2);
    }

    fn count_backups(dir: &TempDir, agent_id: &str) -> usize {
        let prefix = format!("{agent_id}_memories.md.corrupt-");
        std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().starts_with(&prefix))
            .count()
    }

    #[tokio::test]
    async fn test_failed_replace_keeps_previous_file() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);
        let qa = agent("qa");

        let lock = repo.lock(&qa).await.unwrap();
        let mut doc = repo.load(&qa).await.unwrap();
        doc.sections[0].items.push(Item::new("Run the suite twice"));
        repo.save(&lock, &doc).await.unwrap();
        let path = repo.path_for(&qa);
        let before = std::fs::read(&path).unwrap();

        // temp file cannot be created, so the rename never happens
        let temp_path = dir.path().join("missing").join(".qa.tmp");
        let err = replace_file(&path, &temp_path, b"# Qa Agent Memory\n")
            .await
            .unwrap_err();
        assert!(matches!(err, MemoryStorageError::Io { .. }));
        assert_eq!(LoreError::from(err).error_code(), "IO_ERROR");

        // rename onto a non-empty directory fails after the temp file is written
        let blocked = dir.path().join("blocked");
        std::fs::create_dir(&blocked).unwrap();
        std::fs::write(blocked.join("keep"), "x").unwrap();
        let temp_path = dir.path().join(".blocked.tmp");
        let err = replace_file(&blocked, &temp_path, b"new").await.unwrap_err();
        assert!(matches!(err, MemoryStorageError::Io { .. }));
        assert!(!temp_path.exists());

        assert_eq!(std::fs::read(&path).unwrap(), before);
        let reloaded = repo.load(&qa).await.unwrap();
        assert_eq!(reloaded.item_count(), 1);
    }

    #[tokio::test]
    async fn test_unstructured_file_is_treated_as_corrupt() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);
        std::fs::write(dir.path().join("qa_memories.md"), "plain prose only\n").unwrap();

        let doc = repo.load(&agent("qa")).await.unwrap();
        assert_eq!(doc.header, vec!["# Qa Agent Memory"]);
    }

    #[tokio::test]
    async fn test_empty_file_loads_template_without_backup() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);
        std::fs::write(dir.path().join("qa_memories.md"), "\n\n").unwrap();

        let doc = repo.load(&agent("qa")).await.unwrap();
        assert_eq!(doc.sections.len(), 2);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_list_agents_sorted() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);
        assert!(repo.list_agents().await.unwrap().is_empty());

        for id in ["research", "qa", "engineer"] {
            let id = agent(id);
            let lock = repo.lock(&id).await.unwrap();
            let doc = repo.load(&id).await.unwrap();
            repo.save(&lock, &doc).await.unwrap();
        }
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let agents = repo.list_agents().await.unwrap();
        let ids: Vec<&str> = agents.iter().map(AgentId::as_str).collect();
        assert_eq!(ids, vec!["engineer", "qa", "research"]);
    }

    #[tokio::test]
    async fn test_list_agents_missing_dir() {
        let dir = TempDir::new().unwrap();
        let repo =
            FileMemoryRepository::new(dir.path().join("nope"), sections(), Duration::from_secs(1));
        assert!(repo.list_agents().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_creates_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let repo = FileMemoryRepository::new(&nested, sections(), Duration::from_secs(1));
        let qa = agent("qa");

        let lock = repo.lock(&qa).await.unwrap();
        let doc = repo.load(&qa).await.unwrap();
        repo.save(&lock, &doc).await.unwrap();

        assert!(nested.join("qa_memories.md").exists());
    }

    #[tokio::test]
    async fn test_lock_timeout() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);
        let qa = agent("qa");

        let _held = repo.lock(&qa).await.unwrap();
        let err = repo.lock(&qa).await.unwrap_err();
        assert!(matches!(
            err,
            MemoryStorageError::LockTimeout { ref agent_id, .. } if agent_id == "qa"
        ));
    }

    #[tokio::test]
    async fn test_locks_are_per_agent() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);

        let _qa = repo.lock(&agent("qa")).await.unwrap();
        let engineer = repo.lock(&agent("engineer")).await;
        assert!(engineer.is_ok());
    }

    #[tokio::test]
    async fn test_lock_released_on_drop() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);
        let qa = agent("qa");

        drop(repo.lock(&qa).await.unwrap());
        assert!(repo.lock(&qa).await.is_ok());
    }

    #[tokio::test]
    async fn test_in_memory_round_trip() {
        let repo = InMemoryRepository::new(sections());
        let qa = agent("qa");
        assert!(repo.is_empty().await);

        let fresh = repo.load(&qa).await.unwrap();
        assert_eq!(fresh, MemoryDocument::from_template(qa.clone(), &sections()));

        let lock = repo.lock(&qa).await.unwrap();
        let mut doc = fresh.clone();
        doc.section_mut_or_insert("Testing")
            .items
            .push(Item::new("Prefer table-driven tests"));
        repo.save(&lock, &doc).await.unwrap();

        assert_eq!(repo.load(&qa).await.unwrap(), doc);
        assert_eq!(repo.len().await, 1);
        assert_eq!(repo.list_agents().await.unwrap(), vec![qa.clone()]);
        assert!(repo.backing_path(&qa).is_none());
    }

    #[tokio::test]
    async fn test_in_memory_load_is_private_copy() {
        let repo = InMemoryRepository::new(sections());
        let qa = agent("qa");

        let lock = repo.lock(&qa).await.unwrap();
        let doc = repo.load(&qa).await.unwrap();
        repo.save(&lock, &doc).await.unwrap();

        let mut copy = repo.load(&qa).await.unwrap();
        copy.sections.clear();
        assert_eq!(repo.load(&qa).await.unwrap().sections.len(), 2);
    }
}
