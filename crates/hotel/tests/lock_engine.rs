//! Integration tests for the reservation-lock engine.

use chrono::{Duration, NaiveDate, Utc};
use common::{RequestId, RoomId, StayPeriod};
use hotel::{InMemoryLockStore, LockStatus, LockStore, Room, RoomDirectory, RoomLockService};

fn service() -> RoomLockService<InMemoryLockStore> {
    RoomLockService::new(InMemoryLockStore::new())
}

fn day(offset: i64) -> NaiveDate {
    Utc::now().date_naive() + Duration::days(offset)
}

fn period(from: i64, to: i64) -> StayPeriod {
    StayPeriod::new(day(from), day(to)).unwrap()
}

#[tokio::test]
async fn hold_conflict_hold_scenario() {
    let svc = service();

    // req-a holds room 301 for [day+1, day+3).
    let held = svc
        .hold_room(RequestId::new("req-a"), RoomId::new(301), period(1, 3))
        .await
        .unwrap();
    assert_eq!(held.status(), LockStatus::Held);

    // req-b wants [day+2, day+4) on the same room: conflict, nothing created.
    let err = svc
        .hold_room(RequestId::new("req-b"), RoomId::new(301), period(2, 4))
        .await
        .unwrap_err();
    assert!(err.is_conflict());
    assert!(
        svc.store()
            .find_by_request_id(&RequestId::new("req-b"))
            .await
            .unwrap()
            .is_none()
    );

    // req-c gets the same range on room 302 without trouble.
    let other_room = svc
        .hold_room(RequestId::new("req-c"), RoomId::new(302), period(2, 4))
        .await
        .unwrap();
    assert_eq!(other_room.status(), LockStatus::Held);
}

#[tokio::test]
async fn unavailable_room_still_accepts_non_conflicting_hold() {
    // The available flag lives in the directory; the lock engine never
    // reads it, so flipping it off changes nothing about occupancy.
    let directory = RoomDirectory::new();
    let mut room = Room::new(RoomId::new(302), "302", 2);
    room.available = false;
    directory.register(room).await;

    let svc = service();
    let lock = svc
        .hold_room(RequestId::new("req-c"), RoomId::new(302), period(1, 2))
        .await
        .unwrap();
    assert_eq!(lock.status(), LockStatus::Held);
}

#[tokio::test]
async fn active_locks_never_overlap_across_interval_sweep() {
    // Property: whatever mix of holds gets accepted, the HELD/CONFIRMED
    // locks for a room stay pairwise non-overlapping. Sweep all interval
    // pairs in a 9-day window against a shared-night oracle.
    let base = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
    let at = |offset: u32| base + Duration::days(offset as i64);

    for s1 in 0..8u32 {
        for e1 in (s1 + 1)..9 {
            for s2 in 0..8u32 {
                for e2 in (s2 + 1)..9 {
                    let svc = service();
                    let first = StayPeriod::new(at(s1), at(e1)).unwrap();
                    let second = StayPeriod::new(at(s2), at(e2)).unwrap();

                    svc.hold_room(RequestId::new("req-1"), RoomId::new(301), first)
                        .await
                        .unwrap();
                    let outcome = svc
                        .hold_room(RequestId::new("req-2"), RoomId::new(301), second)
                        .await;

                    let shares_night = (s1..e1).any(|night| (s2..e2).contains(&night));
                    assert_eq!(
                        outcome.is_err(),
                        shares_night,
                        "{first} vs {second}: engine disagrees with oracle"
                    );

                    let active = svc
                        .store()
                        .active_for_room(RoomId::new(301))
                        .await
                        .unwrap();
                    for (i, a) in active.iter().enumerate() {
                        for b in &active[i + 1..] {
                            assert!(
                                !a.period().overlaps(&b.period()),
                                "no-overlap invariant violated: {} vs {}",
                                a.period(),
                                b.period()
                            );
                        }
                    }
                }
            }
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_overlapping_holds_admit_exactly_one() {
    // The principal race: many holds for the same room and overlapping
    // ranges arriving at once must leave exactly one lock behind.
    let svc = service();

    let mut handles = Vec::new();
    for i in 0..16 {
        let svc = svc.clone();
        handles.push(tokio::spawn(async move {
            svc.hold_room(
                RequestId::new(format!("req-{i}")),
                RoomId::new(301),
                period(1, 4),
            )
            .await
        }));
    }

    let mut accepted = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => accepted += 1,
            Err(err) => {
                assert!(err.is_conflict());
                conflicts += 1;
            }
        }
    }

    assert_eq!(accepted, 1);
    assert_eq!(conflicts, 15);
    assert_eq!(
        svc.store()
            .active_for_room(RoomId::new(301))
            .await
            .unwrap()
            .len(),
        1
    );
}

#[tokio::test]
async fn confirmed_counts_feed_popularity() {
    let svc = service();

    for (request, room, from, to) in [
        ("req-d", 401, 1, 2),
        ("req-e", 401, 3, 4),
        ("req-f", 402, 1, 2),
    ] {
        svc.hold_room(RequestId::new(request), RoomId::new(room), period(from, to))
            .await
            .unwrap();
        svc.confirm_hold(&RequestId::new(request)).await.unwrap();
    }
    // A hold that never confirms does not count.
    svc.hold_room(RequestId::new("req-g"), RoomId::new(402), period(5, 6))
        .await
        .unwrap();

    assert_eq!(svc.confirmed_count(RoomId::new(401)).await.unwrap(), 2);
    assert_eq!(svc.confirmed_count(RoomId::new(402)).await.unwrap(), 1);
}
