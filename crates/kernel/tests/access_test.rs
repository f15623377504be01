#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Access controller tests: authentication, outcome mapping, and the
//! end-to-end scenario.

use std::sync::Arc;

use lustra_kernel::access::{AccessController, Outcome};
use lustra_kernel::auth::TokenCodec;
use lustra_kernel::store::MemoryBackend;
use lustra_test_utils::{account_input, upload_input};
use uuid::Uuid;

const SECRET: &str = "test-secret-key-for-access-tests";

fn controller() -> AccessController {
    controller_with_codec(TokenCodec::new(SECRET, 24))
}

fn controller_with_codec(codec: TokenCodec) -> AccessController {
    let backend = MemoryBackend::new();
    AccessController::new(codec, Arc::new(backend.clone()), Arc::new(backend))
}

fn ok<T: std::fmt::Debug>(outcome: Outcome<T>) -> T {
    match outcome {
        Outcome::Ok(value) => value,
        other => panic!("expected Ok, got {other:?}"),
    }
}

#[tokio::test]
async fn test_login_issues_verifiable_token() {
    let controller = controller();
    let account = ok(controller.create_account(account_input("ann@x.com").create()).await);

    let (logged_in, token) = ok(controller.login("ann@x.com", "secret1").await);
    assert_eq!(logged_in.id, account.id);

    // The token authenticates a guarded operation.
    let item = ok(controller
        .upload_media(Some(token.as_str()), upload_input("img").build())
        .await);
    assert_eq!(item.owner_id, account.id);
}

#[tokio::test]
async fn test_login_failures_are_uniform() {
    let controller = controller();
    ok(controller.create_account(account_input("ann@x.com").create()).await);

    let wrong_secret = controller.login("ann@x.com", "wrong-secret").await;
    let unknown_email = controller.login("nobody@x.com", "secret1").await;

    assert!(matches!(wrong_secret, Outcome::AuthFailed));
    assert!(matches!(unknown_email, Outcome::AuthFailed));
}

#[tokio::test]
async fn test_guarded_operations_require_a_valid_token() {
    let controller = controller();
    ok(controller.create_account(account_input("ann@x.com").create()).await);

    let missing = controller.upload_media(None, upload_input("img").build()).await;
    assert!(matches!(missing, Outcome::AuthFailed));

    let garbage = controller
        .upload_media(Some("garbage.token"), upload_input("img").build())
        .await;
    assert!(matches!(garbage, Outcome::AuthFailed));

    let foreign = TokenCodec::new("another-secret", 24)
        .issue(Uuid::now_v7(), "ann@x.com", lustra_kernel::models::AccountCategory::Lead)
        .unwrap();
    let forged = controller.delete_media(Some(foreign.as_str()), Uuid::now_v7()).await;
    assert!(matches!(forged, Outcome::AuthFailed));
}

#[tokio::test]
async fn test_expired_token_is_auth_failed() {
    let controller = controller_with_codec(TokenCodec::new(SECRET, 0));
    ok(controller.create_account(account_input("ann@x.com").create()).await);

    let outcome = controller.login("ann@x.com", "secret1").await;
    let (_, token) = ok(outcome);

    let result = controller.upload_media(Some(token.as_str()), upload_input("img").build()).await;
    assert!(matches!(result, Outcome::AuthFailed));
}

#[tokio::test]
async fn test_duplicate_account_maps_to_conflict() {
    let controller = controller();
    ok(controller.create_account(account_input("ann@x.com").create()).await);

    let outcome = controller
        .create_account(account_input("ann@x.com").create())
        .await;

    match outcome {
        Outcome::Conflict(msg) => assert!(msg.contains("ann@x.com"), "{msg}"),
        other => panic!("expected Conflict, got {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_input_maps_to_bad_request() {
    let controller = controller();

    let outcome = controller
        .create_account(account_input("ann@x.com").with_secret("x").create())
        .await;

    match outcome {
        Outcome::BadRequest(msg) => {
            assert_eq!(msg, "Password must be at least 6 characters long");
        }
        other => panic!("expected BadRequest, got {other:?}"),
    }
}

#[tokio::test]
async fn test_update_and_delete_account_outcomes() {
    let controller = controller();
    let account = ok(controller.create_account(account_input("ann@x.com").create()).await);

    let updated = ok(controller
        .update_account(account.id, account_input("ann@y.com").update())
        .await);
    assert_eq!(updated.email, "ann@y.com");

    let missing = controller
        .update_account(Uuid::now_v7(), account_input("zed@x.com").update())
        .await;
    assert!(matches!(missing, Outcome::NotFound));

    assert!(matches!(controller.delete_account(account.id).await, Outcome::Ok(())));
    assert!(matches!(controller.delete_account(account.id).await, Outcome::NotFound));
}

#[tokio::test]
async fn test_account_deletion_leaves_no_orphaned_media() {
    let controller = controller();
    let account = ok(controller.create_account(account_input("ann@x.com").create()).await);
    let (_, token) = ok(controller.login("ann@x.com", "secret1").await);

    ok(controller.upload_media(Some(token.as_str()), upload_input("img").build()).await);
    ok(controller.delete_account(account.id).await);

    let leftovers = ok(controller.list_media(Some(account.id)).await);
    assert!(leftovers.is_empty());
}

#[tokio::test]
async fn test_non_owner_delete_is_forbidden_with_owner_disclosed() {
    let controller = controller();
    let ann = ok(controller.create_account(account_input("ann@x.com").create()).await);
    ok(controller.create_account(account_input("bob@x.com").create()).await);

    let (_, ann_token) = ok(controller.login("ann@x.com", "secret1").await);
    let (_, bob_token) = ok(controller.login("bob@x.com", "secret1").await);

    let item = ok(controller
        .upload_media(Some(ann_token.as_str()), upload_input("img").build())
        .await);

    let refused = controller.delete_media(Some(bob_token.as_str()), item.id).await;
    match refused {
        Outcome::Forbidden(msg) => assert!(msg.contains(&ann.id.to_string()), "{msg}"),
        other => panic!("expected Forbidden, got {other:?}"),
    }

    // Item untouched; the owner can still delete it.
    let still_there = ok(controller.get_media(item.id).await);
    assert_eq!(still_there.owner_id, ann.id);

    assert!(matches!(
        controller.delete_media(Some(ann_token.as_str()), item.id).await,
        Outcome::Ok(())
    ));
    assert!(matches!(controller.get_media(item.id).await, Outcome::NotFound));
}

#[tokio::test]
async fn test_delete_missing_media_is_not_found() {
    let controller = controller();
    ok(controller.create_account(account_input("ann@x.com").create()).await);
    let (_, token) = ok(controller.login("ann@x.com", "secret1").await);

    let outcome = controller.delete_media(Some(token.as_str()), Uuid::now_v7()).await;
    assert!(matches!(outcome, Outcome::NotFound));
}

#[tokio::test]
async fn test_account_summaries_carry_media_counts() {
    let controller = controller();
    let account = ok(controller.create_account(account_input("ann@x.com").create()).await);
    let (_, token) = ok(controller.login("ann@x.com", "secret1").await);

    ok(controller.upload_media(Some(token.as_str()), upload_input("a").build()).await);
    ok(controller.upload_media(Some(token.as_str()), upload_input("b").build()).await);

    let summary = ok(controller.get_account(account.id).await);
    assert_eq!(summary.media_count, 2);

    let all = ok(controller.list_accounts().await);
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].media_count, 2);

    assert!(matches!(controller.get_account(Uuid::now_v7()).await, Outcome::NotFound));
}

/// End-to-end walk of the documented scenario: registration, conflict,
/// quota exhaustion, cross-owner deletion refusal, owner deletion.
#[tokio::test]
async fn test_full_scenario() {
    let controller = controller();

    let ann = ok(controller
        .create_account(account_input("ann@x.com").with_name("Ann").create())
        .await);

    let conflict = controller
        .create_account(account_input("ann@x.com").create())
        .await;
    match conflict {
        Outcome::Conflict(msg) => assert!(msg.contains("ann@x.com")),
        other => panic!("expected Conflict, got {other:?}"),
    }

    let (_, ann_token) = ok(controller.login("ann@x.com", "secret1").await);

    let mut items = Vec::new();
    for n in 1..=10 {
        let item = ok(controller
            .upload_media(Some(ann_token.as_str()), upload_input(&format!("img{n}")).build())
            .await);
        items.push(item);
    }
    assert_eq!(ok(controller.list_media(Some(ann.id)).await).len(), 10);

    let over_quota = controller
        .upload_media(Some(ann_token.as_str()), upload_input("img11").build())
        .await;
    match over_quota {
        Outcome::BadRequest(msg) => assert!(msg.contains("10"), "{msg}"),
        other => panic!("expected BadRequest, got {other:?}"),
    }

    ok(controller.create_account(account_input("bob@x.com").with_name("Bob").create()).await);
    let (_, bob_token) = ok(controller.login("bob@x.com", "secret1").await);

    let third = &items[2];
    assert!(matches!(
        controller.delete_media(Some(bob_token.as_str()), third.id).await,
        Outcome::Forbidden(_)
    ));
    assert!(matches!(controller.get_media(third.id).await, Outcome::Ok(_)));

    assert!(matches!(
        controller.delete_media(Some(ann_token.as_str()), third.id).await,
        Outcome::Ok(())
    ));
    assert!(matches!(controller.get_media(third.id).await, Outcome::NotFound));

    assert_eq!(ok(controller.reset_media().await), 9);
    assert!(ok(controller.list_media(None).await).is_empty());
}
