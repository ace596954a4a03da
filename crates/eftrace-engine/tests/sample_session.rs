use eftrace_engine::{QuestStatus, compute_insights, derive_statistics};
use eftrace_providers::{discover_log_files, parse_text, read_log_files};
use eftrace_testing::{SAMPLE_SESSION, SampleFiles};
use eftrace_types::ParsedLogResult;

fn parse_samples() -> Vec<ParsedLogResult> {
    let samples = SampleFiles::new().expect("sample folder");
    let paths = discover_log_files(samples.root(), &["log".to_string()]).expect("discover");
    let outcome = read_log_files(&paths, u64::MAX, |_| {});
    outcome
        .files
        .iter()
        .map(|file| parse_text(&file.name, &file.content).expect("parse"))
        .collect()
}

#[test]
fn test_sample_session_statistics() {
    let results = parse_samples();
    let stats = derive_statistics(&results);

    assert_eq!(stats.sessions.len(), 1);
    let session = &stats.sessions[0];
    assert_eq!(session.id, SAMPLE_SESSION);
    assert_eq!(session.file_count, 9);
    assert_eq!(session.event_count, 35);
    assert_eq!(session.log_types.len(), 9);

    insta::assert_json_snapshot!(stats.backend, @r###"
    {
      "total_requests": 3,
      "total_responses": 2,
      "total_errors": 1,
      "total_retries": 1,
      "by_status_code": {
        "200": 2,
        "504": 1
      },
      "by_endpoint": {
        "/client/game/start": 2,
        "/client/items": 2,
        "/client/match/group/status": 1
      }
    }
    "###);

    insta::assert_json_snapshot!(stats.cache, @r###"
    {
      "hits": 2,
      "misses": 1
    }
    "###);

    insta::assert_json_snapshot!(stats.errors, @r###"
    {
      "totals": 3,
      "by_family": {
        "NullReferenceException": 2,
        "error": 1
      }
    }
    "###);

    insta::assert_json_snapshot!(stats.inventory, @r###"
    {
      "total_rejections": 2,
      "by_operation": {
        "Move": 1,
        "Split": 1
      },
      "by_code": {
        "228": 1,
        "ItemNotFound": 1
      },
      "by_item": {
        "5c94bbff86f7747ee735c08f": 1
      }
    }
    "###);
    assert_eq!(stats.items.len(), 1);

    insta::assert_json_snapshot!(stats.network, @r###"
    {
      "total_connections": 1,
      "total_disconnects": 1,
      "total_timeouts": 1,
      "by_address": {
        "10.0.0.5:17000": {
          "connects": 1,
          "disconnects": 1,
          "timeouts": 1
        }
      },
      "rtt": {
        "samples": 2,
        "mean": 50.0
      },
      "packets_lost": 2,
      "packets_sent": 1800,
      "packets_received": 1790,
      "message_samples": 2,
      "rpi": {
        "samples": 2,
        "mean": 15.0
      },
      "lud": {
        "samples": 2,
        "mean": 3.0
      }
    }
    "###);

    insta::assert_json_snapshot!((&stats.push, &stats.audio), @r###"
    [
      {
        "connections": 1,
        "drops": 1,
        "notifications": 2
      },
      {
        "init_successes": 1,
        "occlusion_errors": 1
      }
    ]
    "###);

    assert_eq!(stats.matchmaking.group_ids, vec!["grp-7f3a91"]);
    assert_eq!(stats.anticheat.init_lines, 1);
    assert_eq!(stats.anticheat.errors, 1);

    assert_eq!(stats.quests.len(), 1);
    let quest = &stats.quests[0];
    assert_eq!(quest.id, "5936d90786f7742b1420ba5b");
    assert_eq!(quest.status, QuestStatus::Completed);
    assert_eq!(quest.reward_rubles, Some(15000.0));
    assert_eq!(quest.trader_id.as_deref(), Some("54cb50c76803fa8b248b4571"));
    assert_eq!(stats.traders.len(), 1);
}

#[test]
fn test_sample_session_insights_agree() {
    let results = parse_samples();
    let stats = derive_statistics(&results);
    let insights = compute_insights(&results);

    assert_eq!(insights.timelines.len(), stats.sessions.len());
    assert_eq!(insights.timelines[0].event_count, 35);
    assert_eq!(insights.matching.len(), 1);
    assert_eq!(insights.matching[0].events, 2);
}
