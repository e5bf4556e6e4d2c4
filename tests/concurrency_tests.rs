mod common;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use common::{assert_lockstep, hashing_service, SlowProvider, TIMEOUT};
use ticketlens::TicketService;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_assign_unique_dense_ids() {
    let service = Arc::new(hashing_service());

    let mut handles = Vec::new();
    for i in 0..64 {
        let service = Arc::clone(&service);
        handles.push(tokio::spawn(async move {
            service
                .create_ticket(format!("Concurrent {i}"), format!("ticket body number {i}"))
                .await
                .unwrap()
                .id
        }));
    }

    let mut ids = HashSet::new();
    for handle in handles {
        assert!(ids.insert(handle.await.unwrap()));
    }

    assert_eq!(ids, (1..=64).collect::<HashSet<u64>>());
    assert_lockstep(&service);

    // Each id must still map to the ticket that owns it.
    for ticket in service.list_tickets().unwrap() {
        assert_eq!(service.get_ticket(ticket.id).unwrap(), ticket);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn searches_run_alongside_creates() {
    let service = Arc::new(hashing_service());
    service
        .create_ticket("Seed", "database connection refused")
        .await
        .unwrap();

    let writer = {
        let service = Arc::clone(&service);
        tokio::spawn(async move {
            for i in 0..32 {
                service
                    .create_ticket(format!("Writer {i}"), format!("db connection drop {i}"))
                    .await
                    .unwrap();
            }
        })
    };

    let mut readers = Vec::new();
    for _ in 0..4 {
        let service = Arc::clone(&service);
        readers.push(tokio::spawn(async move {
            for _ in 0..16 {
                let hits = service.search("db connection", 5).await.unwrap();
                assert!(!hits.is_empty() && hits.len() <= 5);
                for hit in &hits {
                    assert_eq!(service.get_ticket(hit.ticket.id).unwrap(), hit.ticket);
                }
            }
        }));
    }

    writer.await.unwrap();
    for reader in readers {
        reader.await.unwrap();
    }
    assert_eq!(service.stats().unwrap().tickets, 33);
    assert_lockstep(&service);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn slow_embedding_does_not_block_readers() {
    let provider = SlowProvider::new("slow", Duration::from_millis(300));
    let service = Arc::new(TicketService::new(provider, TIMEOUT));
    service
        .create_ticket("Fast", "fast ticket body")
        .await
        .unwrap();

    let pending = {
        let service = Arc::clone(&service);
        tokio::spawn(async move { service.create_ticket("Slow", "slow ticket body").await })
    };

    tokio::time::sleep(Duration::from_millis(50)).await;
    // The slow create is still embedding and holds no lock.
    assert_eq!(service.list_tickets().unwrap().len(), 1);
    assert_eq!(service.search("fast ticket", 5).await.unwrap().len(), 1);

    let slow = pending.await.unwrap().unwrap();
    assert_eq!(slow.id, 2);
    assert_lockstep(&service);
}
