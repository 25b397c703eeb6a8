//! Repository tests against a real PostgreSQL database
//!
//! Run with: DATABASE_URL=postgres://... cargo test -p gigboard-server -- --ignored
//!
//! Names carry a random suffix so runs do not collide with each other or
//! with existing rows.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use gigboard_server::db::migrations;
use gigboard_server::db::repos::{ArtistRepo, DbError, ShowRepo, VenueRepo};
use gigboard_server::models::{group_by_area, partition_shows, ArtistForm, ShowForm, VenueForm};

async fn pool() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let pool = gigboard_server::create_pool(&url).await.expect("pool creation failed");
    migrations::run(&pool).await.expect("migrations failed");
    pool
}

fn tag() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_owned()
}

fn venue_form(name: &str, city: &str, state: &str) -> VenueForm {
    VenueForm {
        name: name.into(),
        city: city.into(),
        state: state.into(),
        address: "1015 Folsom Street".into(),
        genres: vec!["Jazz".into()],
        ..VenueForm::default()
    }
}

fn artist_form(name: &str) -> ArtistForm {
    ArtistForm {
        name: name.into(),
        city: "San Francisco".into(),
        state: "CA".into(),
        genres: vec!["Rock n Roll".into()],
        ..ArtistForm::default()
    }
}

#[tokio::test]
#[ignore = "requires database"]
async fn venue_round_trip() {
    let pool = pool().await;
    let repo = VenueRepo::new(&pool);
    let name = format!("The Musical Hop {}", tag());

    let fields = venue_form(&name, "San Francisco", "CA").validate().unwrap();
    let created = repo.create(&fields).await.unwrap();
    let fetched = repo.get(created.id).await.unwrap();

    assert_eq!(fetched.name, name);
    assert_eq!(fetched.genres, vec!["Jazz".to_string()]);
    assert!(!fetched.seeking_talent);
    assert_eq!(fetched.phone, None);
}

#[tokio::test]
#[ignore = "requires database"]
async fn grouped_listing_is_homogeneous() {
    let pool = pool().await;
    let repo = VenueRepo::new(&pool);
    let city = format!("Springfield {}", tag());

    for (name, state) in [("A Hall", "IL"), ("B Hall", "MO"), ("C Hall", "IL")] {
        let fields = venue_form(name, &city, state).validate().unwrap();
        repo.create(&fields).await.unwrap();
    }

    let areas = group_by_area(repo.list_by_area().await.unwrap());
    let ours: Vec<_> = areas.iter().filter(|a| a.city == city).collect();

    // Sorted by (city, name, state), so the states interleave into runs
    let states: Vec<&str> = ours.iter().map(|a| a.state.as_str()).collect();
    assert_eq!(states, vec!["IL", "MO", "IL"]);
    let total: usize = ours.iter().map(|a| a.venues.len()).sum();
    assert_eq!(total, 3);
}

#[tokio::test]
#[ignore = "requires database"]
async fn search_is_case_insensitive_and_literal() {
    let pool = pool().await;
    let repo = VenueRepo::new(&pool);
    let t = tag();

    for name in [format!("Hop {t}"), format!("the musical hop {t}"), format!("100% Jazz {t}")] {
        let fields = venue_form(&name, "San Francisco", "CA").validate().unwrap();
        repo.create(&fields).await.unwrap();
    }

    let hits = repo.search(&format!("HOP {t}")).await.unwrap();
    assert_eq!(hits.len(), 2);

    let hits = repo.search(&format!("0% Jazz {t}")).await.unwrap();
    assert_eq!(hits.len(), 1);

    // `%` is literal, not a wildcard
    let hits = repo.search(&format!("%{t}")).await.unwrap();
    assert!(hits.is_empty());
}

#[tokio::test]
#[ignore = "requires database"]
async fn editing_artist_name_keeps_other_fields() {
    let pool = pool().await;
    let repo = ArtistRepo::new(&pool);
    let t = tag();

    let mut form = artist_form(&format!("Guns N Petals {t}"));
    form.phone = Some("326-123-5000".into());
    let created = repo.create(&form.validate().unwrap()).await.unwrap();

    form.name = format!("Guns N Roses {t}");
    let updated = repo.update(created.id, &form.validate().unwrap()).await.unwrap();

    assert_eq!(updated.name, format!("Guns N Roses {t}"));
    assert_eq!(updated.phone, created.phone);
    assert_eq!(updated.genres, created.genres);
    assert_eq!(updated.city, created.city);
}

#[tokio::test]
#[ignore = "requires database"]
async fn missing_records_are_not_found() {
    let pool = pool().await;

    let err = ArtistRepo::new(&pool).get(i64::MAX).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound { resource: "artist", .. }));

    let fields = venue_form("Nowhere", "Nowhere", "NA").validate().unwrap();
    let err = VenueRepo::new(&pool).update(i64::MAX, &fields).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound { resource: "venue", .. }));

    let err = ShowRepo::new(&pool).delete(i64::MAX).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound { resource: "show", .. }));
}

#[tokio::test]
#[ignore = "requires database"]
async fn show_with_missing_venue_is_not_written() {
    let pool = pool().await;
    let artist = ArtistRepo::new(&pool)
        .create(&artist_form(&format!("Matt Quevedo {}", tag())).validate().unwrap())
        .await
        .unwrap();

    let form = ShowForm {
        artist_id: Some(artist.id),
        venue_id: Some(i64::MAX),
        start_time: None,
    };
    let err = ShowRepo::new(&pool)
        .create(&form.validate().unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, DbError::NotFound { resource: "venue", .. }));
    assert!(ArtistRepo::new(&pool).shows(artist.id).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires database"]
async fn shows_partition_and_cascade() {
    let pool = pool().await;
    let t = tag();
    let venue = VenueRepo::new(&pool)
        .create(&venue_form(&format!("Park Square {t}"), "San Francisco", "CA").validate().unwrap())
        .await
        .unwrap();
    let artist = ArtistRepo::new(&pool)
        .create(&artist_form(&format!("The Wild Sax Band {t}")).validate().unwrap())
        .await
        .unwrap();

    let now = Utc::now();
    let shows = ShowRepo::new(&pool);
    let mut ids = Vec::new();
    for offset in [Duration::days(-30), Duration::days(30)] {
        let form = ShowForm {
            artist_id: Some(artist.id),
            venue_id: Some(venue.id),
            start_time: Some((now + offset).to_rfc3339()),
        };
        ids.push(shows.create(&form.validate().unwrap()).await.unwrap().id);
    }

    let split = partition_shows(
        VenueRepo::new(&pool).shows(venue.id).await.unwrap(),
        now,
        |s| s.start_time,
    );
    assert_eq!(split.past.len(), 1);
    assert_eq!(split.upcoming.len(), 1);

    let listed = VenueRepo::new(&pool).search(&format!("Park Square {t}")).await.unwrap();
    assert_eq!(listed[0].num_upcoming_shows, 2);

    VenueRepo::new(&pool).delete(venue.id).await.unwrap();
    for id in ids {
        let err = shows.get(id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "show", .. }));
    }
    assert!(ArtistRepo::new(&pool).shows(artist.id).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires database"]
async fn deleted_venue_is_gone() {
    let pool = pool().await;
    let repo = VenueRepo::new(&pool);

    let err = repo.delete(i64::MAX).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound { resource: "venue", .. }));

    let fields = venue_form(&format!("The Dueling Pianos Bar {}", tag()), "New York", "NY")
        .validate()
        .unwrap();
    let venue = repo.create(&fields).await.unwrap();
    let deleted = repo.delete(venue.id).await.unwrap();
    assert_eq!(deleted.id, venue.id);

    let err = repo.get(venue.id).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound { resource: "venue", .. }));
}
