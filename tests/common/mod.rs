#![allow(dead_code)]

use africa_pay_core::scripts::{ScriptHost, ScriptTag};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashSet, VecDeque};
use std::time::Duration;
use tokio::time::Instant;

/// What the host does on one injection.
#[derive(Debug, Clone)]
pub enum Behavior {
    Load,
    LoadAfter(Duration),
    Fail(&'static str),
    Hang,
    Panic,
}

/// In-memory host that follows a script of per-attempt behaviours and records
/// every call the loader makes.
pub struct ScriptedHost {
    queued: Mutex<VecDeque<Behavior>>,
    fallback: Behavior,
    present: Mutex<HashSet<String>>,
    injections: Mutex<Vec<(ScriptTag, Instant)>>,
    removals: Mutex<Vec<String>>,
}

impl ScriptedHost {
    pub fn new(fallback: Behavior) -> Self {
        Self {
            queued: Mutex::new(VecDeque::new()),
            fallback,
            present: Mutex::new(HashSet::new()),
            injections: Mutex::new(Vec::new()),
            removals: Mutex::new(Vec::new()),
        }
    }

    pub fn always_loads() -> Self {
        Self::new(Behavior::Load)
    }

    pub fn always_fails() -> Self {
        Self::new(Behavior::Fail("network error"))
    }

    pub fn then(self, behavior: Behavior) -> Self {
        self.queued.lock().push_back(behavior);
        self
    }

    pub fn queue(&self, behavior: Behavior) {
        self.queued.lock().push_back(behavior);
    }

    pub fn preload(&self, src: &str) {
        self.present.lock().insert(src.to_string());
    }

    pub fn injection_count(&self) -> usize {
        self.injections.lock().len()
    }

    pub fn injected_tags(&self) -> Vec<ScriptTag> {
        self.injections.lock().iter().map(|(tag, _)| tag.clone()).collect()
    }

    /// Time elapsed between consecutive injections.
    pub fn injection_gaps(&self) -> Vec<Duration> {
        let injections = self.injections.lock();
        injections
            .windows(2)
            .map(|pair| pair[1].1.duration_since(pair[0].1))
            .collect()
    }

    pub fn removals(&self) -> Vec<String> {
        self.removals.lock().clone()
    }
}

#[async_trait]
impl ScriptHost for ScriptedHost {
    fn exists(&self, src: &str) -> bool {
        self.present.lock().contains(src)
    }

    async fn inject(&self, tag: &ScriptTag) -> Result<(), String> {
        self.injections.lock().push((tag.clone(), Instant::now()));
        let behavior = self
            .queued
            .lock()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());

        match behavior {
            Behavior::Load => {}
            Behavior::LoadAfter(delay) => tokio::time::sleep(delay).await,
            Behavior::Fail(message) => return Err(message.to_string()),
            Behavior::Hang => std::future::pending::<()>().await,
            Behavior::Panic => panic!("host crashed while injecting {}", tag.src),
        }

        self.present.lock().insert(tag.src.clone());
        Ok(())
    }

    fn remove(&self, src: &str) {
        self.present.lock().remove(src);
        self.removals.lock().push(src.to_string());
    }
}
