use carrental::application::service::RentalService;
use carrental::config::EngineConfig;
use carrental::domain::ports::{CompanyStore, ReservationStore};
use carrental::domain::quote::ReservationConstraints;
use carrental::error::RentalError;
use carrental::infrastructure::in_memory::{InMemoryCompanyStore, InMemoryReservationStore};
use common::{day, loaded_service, period, service, single_type_company};
use std::sync::Arc;

mod common;

#[tokio::test]
async fn test_renter_name_is_set_once() {
    let service = loaded_service().await;
    let mut session = service.new_reservation_session();

    session.set_renter_name("alice").unwrap();
    assert!(matches!(
        session.set_renter_name("mallory"),
        Err(RentalError::AlreadySet)
    ));
    assert_eq!(session.renter_name(), Some("alice"));
}

#[tokio::test]
async fn test_confirm_returns_reservations_in_quote_order() {
    let service = loaded_service().await;
    let mut session = service.new_reservation_session();
    let p = period(day(2025, 4, 1), day(2025, 4, 5));

    for (car_type, region) in [("Van", "Leuven"), ("Budget", "Ghent"), ("Economy", "Brussels")] {
        session
            .create_quote("alice", &ReservationConstraints::new(p, car_type, region))
            .await
            .unwrap();
    }
    let quotes = session.current_quotes().to_vec();
    let reservations = session.confirm_quotes().await.unwrap();

    assert_eq!(reservations.len(), 3);
    for (reservation, quote) in reservations.iter().zip(&quotes) {
        assert_eq!(&reservation.quote, quote);
    }
    assert!(session.current_quotes().is_empty());
}

#[tokio::test]
async fn test_failed_batch_leaves_no_reservations() {
    let (service, companies) = service();
    single_type_company(&companies, "Hertz", "Leuven", "Compact", 2).await;
    single_type_company(&companies, "Dockx", "Leuven", "Van", 1).await;
    let p = period(day(2025, 4, 1), day(2025, 4, 5));

    // Two sessions both get a quote for the single van.
    let mut early = service.new_reservation_session();
    early
        .create_quote("bob", &ReservationConstraints::new(p, "Van", "Leuven"))
        .await
        .unwrap();

    let mut late = service.new_reservation_session();
    for car_type in ["Compact", "Compact", "Van"] {
        late.create_quote("alice", &ReservationConstraints::new(p, car_type, "Leuven"))
            .await
            .unwrap();
    }

    early.confirm_quotes().await.unwrap();

    // The third quote of the batch is stale; the two compacts must be released.
    let result = late.confirm_quotes().await;
    assert!(matches!(result, Err(RentalError::ConfirmationFailed(_))));
    assert_eq!(late.current_quotes().len(), 3);

    let manager = service.manager();
    assert_eq!(manager.number_of_reservations_by("alice").await.unwrap(), 0);
    assert_eq!(manager.number_of_reservations_by("bob").await.unwrap(), 1);
    assert_eq!(
        manager
            .number_of_reservations_for_car_type("Hertz", "Compact")
            .await
            .unwrap(),
        0
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_confirmations_never_double_book() {
    for _ in 0..25 {
        let companies = Arc::new(InMemoryCompanyStore::new());
        let reservations = Arc::new(InMemoryReservationStore::new());
        single_type_company(&companies, "Hertz", "Leuven", "Compact", 1).await;
        let service = RentalService::new(
            companies.clone(),
            reservations.clone(),
            EngineConfig::default(),
        );
        let p = period(day(2025, 4, 1), day(2025, 4, 5));

        let mut handles = Vec::new();
        for client in ["alice", "bob"] {
            let mut session = service.new_reservation_session();
            session
                .create_quote(client, &ReservationConstraints::new(p, "Compact", "Leuven"))
                .await
                .unwrap();
            handles.push(tokio::spawn(async move { session.confirm_quotes().await }));
        }

        let mut confirmed = 0;
        let mut failed = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => confirmed += 1,
                Err(RentalError::ConfirmationFailed(_)) => failed += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
        assert_eq!((confirmed, failed), (1, 1));
        assert_eq!(reservations.get_all().await.unwrap().len(), 1);

        let hertz = companies.get("Hertz").await.unwrap().unwrap();
        assert_eq!(hertz.lock().await.reservations().count(), 1);
    }
}

#[tokio::test]
async fn test_random_selection_books_every_free_car() {
    let companies = Arc::new(InMemoryCompanyStore::new());
    single_type_company(&companies, "Hertz", "Leuven", "Compact", 3).await;
    let service = RentalService::new(
        companies.clone(),
        Arc::new(InMemoryReservationStore::new()),
        EngineConfig {
            seed: Some(7),
            ..EngineConfig::default()
        },
    );
    let p = period(day(2025, 4, 1), day(2025, 4, 5));

    let mut session = service.new_reservation_session();
    for _ in 0..3 {
        session
            .create_quote("alice", &ReservationConstraints::new(p, "Compact", "Leuven"))
            .await
            .unwrap();
    }
    let mut car_ids: Vec<u32> = session
        .confirm_quotes()
        .await
        .unwrap()
        .iter()
        .map(|r| r.car_id)
        .collect();
    car_ids.sort_unstable();
    assert_eq!(car_ids, vec![0, 1, 2]);
}
