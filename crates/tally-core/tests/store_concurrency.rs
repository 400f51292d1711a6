//! Concurrency behaviour of the in-memory store.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use bytes::Bytes;
use tally_core::{KvStore, MemoryStore, Result, Value};

fn filled(byte: u8) -> Value {
    Value::Bytes(Bytes::from(vec![byte; 4096]))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_gets_never_see_torn_values() {
    let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
    store.put("blob", filled(b'a')).await.unwrap();

    let writer = {
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            for i in 0..500 {
                let byte = if i % 2 == 0 { b'b' } else { b'a' };
                store.put("blob", filled(byte)).await.unwrap();
            }
        })
    };

    let mut readers = Vec::new();
    for _ in 0..4 {
        let store = Arc::clone(&store);
        readers.push(tokio::spawn(async move {
            for _ in 0..500 {
                let Some(Value::Bytes(b)) = store.get("blob").await.unwrap() else {
                    panic!("blob must stay a bytes value");
                };
                assert_eq!(b.len(), 4096);
                assert!(b.iter().all(|&x| x == b[0]), "torn read");
            }
        }));
    }

    writer.await.unwrap();
    for r in readers {
        r.await.unwrap();
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn put_is_visible_to_later_gets_on_other_tasks() {
    let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());

    for n in 0..50_i64 {
        store.put("k", Value::Int(n)).await.unwrap();
        let seen = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.get("k").await.unwrap() })
                .await
                .unwrap()
        };
        assert_eq!(seen, Some(Value::Int(n)));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn parallel_writers_to_distinct_keys_all_land() {
    let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());

    let mut tasks = Vec::new();
    for n in 0..64_i64 {
        let store = Arc::clone(&store);
        tasks.push(tokio::spawn(async move {
            store.put(&format!("k{n}"), Value::Int(n)).await
        }));
    }
    for t in tasks {
        t.await.unwrap().unwrap();
    }

    assert_eq!(store.len().await.unwrap(), 64);
    for n in 0..64_i64 {
        assert_eq!(store.get(&format!("k{n}")).await.unwrap(), Some(Value::Int(n)));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn update_never_loses_increments() {
    let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
    store.put("n", Value::Int(0)).await.unwrap();

    let mut tasks = Vec::new();
    for _ in 0..100 {
        let store = Arc::clone(&store);
        tasks.push(tokio::spawn(async move {
            store
                .update("n", &|cur: Option<&Value>| -> Result<Value> {
                    let n = cur.map(|v| v.expect_int("n")).transpose()?.unwrap_or(0);
                    Ok(Value::Int(n + 1))
                })
                .await
        }));
    }
    for t in tasks {
        t.await.unwrap().unwrap();
    }

    assert_eq!(store.get("n").await.unwrap(), Some(Value::Int(100)));
}
