//! Moderation scenario tests
//!
//! Whole scenarios driven through the event handler with a recording platform. The
//! in-memory tests always run; the PostgreSQL variants skip when DATABASE_URL is unset.
//!
//! Run with: cargo test -p integration-tests --test moderation_tests

use guard_core::traits::{BanRepository, OffenderRepository};
use guard_core::BAN_THRESHOLD;
use integration_tests::{Member, PlatformCall, TestBot, GROUP};

// ============================================================================
// Escalation
// ============================================================================

async fn three_strikes(bot: &TestBot) {
    let spammer = Member::unique("spammer");

    bot.send(spammer.shills(1)).await;
    bot.send(spammer.shills(2)).await;
    bot.send(spammer.shills(3)).await;

    let name = &spammer.name;
    assert_eq!(
        bot.platform.calls(),
        vec![
            PlatformCall::DeleteMessage {
                chat_id: GROUP,
                message_id: 1
            },
            PlatformCall::Send {
                chat_id: GROUP,
                reply_to: None,
                text: format!(
                    "@{name}, this is warning #1 of {BAN_THRESHOLD} for sharing a contract \
                     address. On warning #{BAN_THRESHOLD}, you will be removed from the group."
                ),
            },
            PlatformCall::DeleteMessage {
                chat_id: GROUP,
                message_id: 2
            },
            PlatformCall::Send {
                chat_id: GROUP,
                reply_to: None,
                text: format!(
                    "@{name}, this is warning #2 of {BAN_THRESHOLD} for sharing a contract \
                     address. On warning #{BAN_THRESHOLD}, you will be removed from the group."
                ),
            },
            PlatformCall::DeleteMessage {
                chat_id: GROUP,
                message_id: 3
            },
            PlatformCall::Send {
                chat_id: GROUP,
                reply_to: None,
                text: format!("@{name} has been removed from the group for repeated violations."),
            },
            PlatformCall::RemoveMember {
                chat_id: GROUP,
                user_id: spammer.id
            },
        ]
    );

    let offenders = bot.context.offender_repo();
    let bans = bot.context.ban_repo();
    assert!(offenders.find(spammer.user_id()).await.unwrap().is_none());
    let ban = bans.find(spammer.user_id()).await.unwrap().unwrap();
    assert_eq!(ban.display_name, spammer.name);

    bans.delete(spammer.user_id()).await.unwrap();
}

#[tokio::test]
async fn test_three_flagged_messages_warn_warn_ban() {
    let bot = TestBot::in_memory(&[]);
    three_strikes(&bot).await;
}

#[tokio::test]
async fn test_three_flagged_messages_warn_warn_ban_postgres() {
    let Some(bot) = TestBot::postgres(&[]).await else {
        return;
    };
    three_strikes(&bot).await;
}

#[tokio::test]
async fn test_clean_messages_leave_no_trace() {
    let bot = TestBot::in_memory(&[]);
    let member = Member::unique("chatty");

    bot.send(member.says(1, "gm, anyone watching the game tonight?"))
        .await;
    bot.send(member.says(2, "short base58 run: 9xQeWvG816bUx9EP"))
        .await;

    assert!(bot.platform.calls().is_empty());
    assert!(bot
        .context
        .offender_repo()
        .find(member.user_id())
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_administrators_are_never_scanned() {
    let bot = TestBot::in_memory(&[integration_tests::ADMIN]);
    let admin = Member::admin();

    for message_id in 1..=5 {
        bot.send(admin.shills(message_id)).await;
    }

    assert!(bot.platform.calls().is_empty());
    assert!(!bot.context.ban_repo().is_banned(admin.user_id()).await.unwrap());
}

#[tokio::test]
async fn test_users_are_counted_independently() {
    let bot = TestBot::in_memory(&[]);
    let alice = Member::unique("alice");
    let bob = Member::unique("bob");

    bot.send(alice.shills(1)).await;
    bot.send(bob.shills(2)).await;
    bot.send(alice.shills(3)).await;

    let offenders = bot.context.offender_repo();
    let alice_count = offenders.find(alice.user_id()).await.unwrap().unwrap();
    let bob_count = offenders.find(bob.user_id()).await.unwrap().unwrap();
    assert_eq!(alice_count.warning_count, 2);
    assert_eq!(bob_count.warning_count, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_violations_ban_exactly_once() {
    let bot = std::sync::Arc::new(TestBot::in_memory(&[]));
    let spammer = Member::unique("burst");

    let mut handles = Vec::new();
    for message_id in 1..=3 {
        let bot = std::sync::Arc::clone(&bot);
        let event = spammer.shills(message_id);
        handles.push(tokio::spawn(async move { bot.send(event).await }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let removals = bot
        .platform
        .calls()
        .into_iter()
        .filter(|call| matches!(call, PlatformCall::RemoveMember { .. }))
        .count();
    assert_eq!(removals, 1);
    assert!(bot.context.ban_repo().is_banned(spammer.user_id()).await.unwrap());
}

// ============================================================================
// Rejoin and unban
// ============================================================================

async fn rejoin_then_unban(bot: &TestBot) {
    let admin = Member::admin();
    let spammer = Member::unique("returner");

    for message_id in 1..=3 {
        bot.send(spammer.shills(message_id)).await;
    }
    bot.platform.take_calls();

    // Every rejoin while banned is rejected
    for _ in 0..2 {
        bot.send(spammer.joins()).await;
        assert_eq!(
            bot.platform.take_calls(),
            vec![
                PlatformCall::Send {
                    chat_id: GROUP,
                    reply_to: None,
                    text: format!(
                        "A banned user (@{}) attempted to rejoin and was removed again.",
                        spammer.name
                    ),
                },
                PlatformCall::RemoveMember {
                    chat_id: GROUP,
                    user_id: spammer.id
                },
            ]
        );
    }
    assert!(bot.context.ban_repo().is_banned(spammer.user_id()).await.unwrap());

    bot.send(admin.unbans(10, &spammer)).await;
    assert_eq!(
        bot.platform.take_calls(),
        vec![PlatformCall::Send {
            chat_id: GROUP,
            reply_to: Some(10),
            text: format!("User {} has been unbanned.", spammer.id),
        }]
    );

    bot.send(admin.unbans(11, &spammer)).await;
    assert_eq!(
        bot.platform.take_calls(),
        vec![PlatformCall::Send {
            chat_id: GROUP,
            reply_to: Some(11),
            text: format!("User {} is not banned.", spammer.id),
        }]
    );

    // After the unban a rejoin is allowed silently
    bot.send(spammer.joins()).await;
    assert!(bot.platform.take_calls().is_empty());
}

#[tokio::test]
async fn test_rejoin_rejected_until_unbanned() {
    let bot = TestBot::in_memory(&[integration_tests::ADMIN]);
    rejoin_then_unban(&bot).await;
}

#[tokio::test]
async fn test_rejoin_rejected_until_unbanned_postgres() {
    let Some(bot) = TestBot::postgres(&[integration_tests::ADMIN]).await else {
        return;
    };
    rejoin_then_unban(&bot).await;
}

#[tokio::test]
async fn test_new_member_without_ban_is_allowed() {
    let bot = TestBot::in_memory(&[]);
    bot.send(Member::unique("newbie").joins()).await;
    assert!(bot.platform.calls().is_empty());
}

#[tokio::test]
async fn test_unban_of_unknown_user_is_not_found() {
    let bot = TestBot::in_memory(&[integration_tests::ADMIN]);
    let stranger = Member::unique("stranger");

    bot.send(Member::admin().unbans(4, &stranger)).await;

    assert_eq!(
        bot.platform.sent_texts(),
        vec![format!("User {} is not banned.", stranger.id)]
    );
}

#[tokio::test]
async fn test_unban_from_non_admin_changes_nothing() {
    let bot = TestBot::in_memory(&[integration_tests::ADMIN]);
    let spammer = Member::unique("banned");
    let friend = Member::unique("friend");

    for message_id in 1..=3 {
        bot.send(spammer.shills(message_id)).await;
    }
    bot.platform.take_calls();

    bot.send(friend.unbans(9, &spammer)).await;

    assert!(bot.platform.calls().is_empty());
    assert!(bot.context.ban_repo().is_banned(spammer.user_id()).await.unwrap());
}

#[tokio::test]
async fn test_address_behind_unban_prefix_is_still_screened() {
    let bot = TestBot::in_memory(&[integration_tests::ADMIN]);
    let spammer = Member::unique("sneaky");
    let text = format!("/unban buy {} now", integration_tests::SAMPLE_ADDRESS);

    for message_id in 1..=3 {
        bot.send(spammer.commands(message_id, &text)).await;
    }

    let calls = bot.platform.calls();
    assert!(calls.contains(&PlatformCall::DeleteMessage {
        chat_id: GROUP,
        message_id: 1
    }));
    assert!(calls.contains(&PlatformCall::RemoveMember {
        chat_id: GROUP,
        user_id: spammer.id
    }));
    assert!(bot.context.ban_repo().is_banned(spammer.user_id()).await.unwrap());
}
