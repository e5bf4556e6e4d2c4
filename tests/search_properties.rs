mod common;

use common::{assert_lockstep, hashing_service, CountingProvider, TIMEOUT};
use ticketlens::{TicketError, TicketService};

async fn seeded_service() -> TicketService {
    let service = hashing_service();
    service
        .create_ticket("Database timeout", "database timeout when opening a db connection")
        .await
        .unwrap();
    service
        .create_ticket("Pool exhausted", "db connection pool exhausted")
        .await
        .unwrap();
    service
        .create_ticket("Button misaligned", "Submit button misaligned on the settings page")
        .await
        .unwrap();
    service
}

#[tokio::test]
async fn created_ticket_reads_back_identically() {
    let service = hashing_service();
    let created = service
        .create_ticket("Login broken", "Login page returns 500 on submit")
        .await
        .unwrap();

    assert_eq!(created.id, 1);
    assert_eq!(service.get_ticket(created.id).unwrap(), created);
    assert_eq!(service.list_tickets().unwrap(), vec![created]);
}

#[tokio::test]
async fn ids_are_dense_and_never_reused() {
    let service = hashing_service();
    let mut ids = Vec::new();
    for i in 0..10 {
        let ticket = service
            .create_ticket(format!("Ticket {i}"), format!("description for ticket {i}"))
            .await
            .unwrap();
        ids.push(ticket.id);
        assert_lockstep(&service);
    }
    assert_eq!(ids, (1..=10).collect::<Vec<u64>>());
    assert!(matches!(service.get_ticket(11), Err(TicketError::NotFound(11))));
}

#[tokio::test]
async fn empty_store_search_skips_provider() {
    let provider = CountingProvider::new();
    let service = TicketService::new(provider.clone(), TIMEOUT);

    let hits = service.search("anything at all", 5).await.unwrap();
    assert!(hits.is_empty());
    assert_eq!(provider.calls(), 0);

    service
        .create_ticket("Printer", "Printer out of toner")
        .await
        .unwrap();
    assert_eq!(provider.calls(), 1);
    service.search("toner", 5).await.unwrap();
    assert_eq!(provider.calls(), 2);
}

#[tokio::test]
async fn results_are_bounded_and_ordered() {
    let service = seeded_service().await;

    for k in [1usize, 2, 3, 10] {
        let hits = service.search("db connection issue", k).await.unwrap();
        assert_eq!(hits.len(), k.min(3));
        for hit in &hits {
            assert!((-1.0..=1.0).contains(&hit.score), "score {}", hit.score);
        }
        for pair in hits.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }
}

#[tokio::test]
async fn login_round_trip() {
    let service = hashing_service();
    service
        .create_ticket("Login broken", "Login page returns 500 on submit")
        .await
        .unwrap();

    let related = service.search("login error 500", 1).await.unwrap();
    let unrelated = service.search("printer out of toner", 1).await.unwrap();

    assert_eq!(related[0].ticket.id, 1);
    assert!(
        related[0].score > unrelated[0].score,
        "related {} vs unrelated {}",
        related[0].score,
        unrelated[0].score
    );
}

#[tokio::test]
async fn database_tickets_outrank_ui_ticket() {
    let service = seeded_service().await;

    let hits = service.search("db connection issue", 2).await.unwrap();
    let mut ids: Vec<u64> = hits.iter().map(|hit| hit.ticket.id).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![1, 2]);

    let all = service.search("db connection issue", 3).await.unwrap();
    assert_eq!(all[2].ticket.id, 3);
}

#[tokio::test]
async fn hits_carry_full_tickets() {
    let service = seeded_service().await;
    let hits = service.search("settings page button", 1).await.unwrap();
    assert_eq!(hits[0].ticket, service.get_ticket(3).unwrap());
}

#[tokio::test]
async fn stats_report_model_and_sizes() {
    let service = seeded_service().await;
    let stats = service.stats().unwrap();
    assert_eq!(stats.tickets, 3);
    assert_eq!(stats.dimension, Some(384));
    assert_eq!(stats.model, service.model_name());
    assert_lockstep(&service);
}
