use eftrace_engine::{compute_insights, derive_statistics};
use eftrace_testing::{ResultBuilder, event};
use eftrace_types::LogType;

#[test]
fn test_timeline_count_matches_session_count() {
    let results = vec![
        ResultBuilder::new(LogType::Backend)
            .session("2024.03.12_14-22-58_0.14.1.2.29197")
            .event(event(LogType::Backend))
            .build(),
        ResultBuilder::new(LogType::Errors)
            .session("2024.03.12_14-22-58_0.14.1.2.29197")
            .event(event(LogType::Errors).at(120))
            .build(),
        ResultBuilder::new(LogType::Backend)
            .session("2024.03.13_09-01-02_0.14.1.2.29197")
            .event(event(LogType::Backend))
            .build(),
        ResultBuilder::new(LogType::Application)
            .event(event(LogType::Application))
            .build(),
    ];

    let stats = derive_statistics(&results);
    let insights = compute_insights(&results);

    assert_eq!(stats.sessions.len(), 3);
    assert_eq!(insights.timelines.len(), stats.sessions.len());

    for (timeline, session) in insights.timelines.iter().zip(&stats.sessions) {
        assert_eq!(timeline.session_id, session.id);
        assert_eq!(timeline.event_count, session.event_count);
        assert_eq!(timeline.file_count, session.file_count);
        assert_eq!(timeline.start, session.start);
        assert_eq!(timeline.end, session.end);
    }

    let first = &insights.timelines[0];
    assert_eq!(first.duration_seconds, Some(120));
    assert_eq!(first.activity.len(), 2);
}

#[test]
fn test_activity_counts_error_level_lines() {
    let result = ResultBuilder::new(LogType::Application)
        .events([
            event(LogType::Application).at(1).level("Error"),
            event(LogType::Application).at(2),
            event(LogType::Application).at(61).level("Error"),
        ])
        .build();
    let insights = compute_insights(&[result]);
    let activity = &insights.timelines[0].activity;

    assert_eq!(activity.len(), 2);
    assert_eq!(activity[0].count, 2);
    assert_eq!(activity[0].sum, Some(1.0));
    assert_eq!(activity[1].count, 1);
}

#[test]
fn test_error_insights_only_from_errors_log() {
    let errors = ResultBuilder::new(LogType::Errors)
        .events([
            event(LogType::Errors).family("error").at(30),
            event(LogType::Errors).family("NullReferenceException").at(10),
            event(LogType::Errors).family("NullReferenceException").at(50),
        ])
        .build();
    let application = ResultBuilder::new(LogType::Application)
        .event(event(LogType::Application).family("error").level("Error"))
        .build();

    let insights = compute_insights(&[errors, application]);

    assert_eq!(insights.errors.len(), 2);
    let top = &insights.errors[0];
    assert_eq!(top.family, "NullReferenceException");
    assert_eq!(top.count, 2);
    assert_eq!((top.last_seen - top.first_seen).num_seconds(), 40);
    assert_eq!(insights.errors[1].count, 1);
}

#[test]
fn test_connectivity_per_address_and_rtt_series() {
    let result = ResultBuilder::new(LogType::NetworkConnection)
        .events([
            event(LogType::NetworkConnection)
                .family("connect")
                .field("address", "10.0.0.5:17000"),
            event(LogType::NetworkConnection)
                .family("statistics")
                .field("rtt", 48)
                .at(10),
            event(LogType::NetworkConnection)
                .family("statistics")
                .field("rtt", 52)
                .at(20),
            event(LogType::NetworkConnection)
                .family("disconnect")
                .field("address", "10.0.0.5:17000")
                .at(30),
        ])
        .build();
    let insights = compute_insights(&[result]);
    let connectivity = &insights.connectivity;

    assert_eq!(connectivity.addresses.len(), 2);
    let server = connectivity
        .addresses
        .iter()
        .find(|a| a.address == "10.0.0.5:17000")
        .unwrap();
    assert_eq!(server.connects, 1);
    assert_eq!(server.disconnects, 1);
    assert_eq!((server.last_seen - server.first_seen).num_seconds(), 30);

    let rtts: Vec<f64> = connectivity.rtt.iter().map(|p| p.y).collect();
    assert_eq!(rtts, vec![48.0, 52.0]);
    assert!(connectivity.rtt[0].x < connectivity.rtt[1].x);
}

#[test]
fn test_matching_window_per_session() {
    let result = ResultBuilder::new(LogType::Application)
        .session("2024.03.12_14-22-58_0.14.1.2.29197")
        .events([
            event(LogType::Application)
                .family("matchmaking")
                .field("groupId", "grp-1")
                .at(0),
            event(LogType::Application).family("anticheat").at(5),
            event(LogType::Application)
                .family("matchmaking")
                .field("groupId", "grp-1")
                .at(15),
        ])
        .build();
    let insights = compute_insights(&[result]);

    assert_eq!(insights.matching.len(), 1);
    let matching = &insights.matching[0];
    assert_eq!(matching.events, 2);
    assert_eq!(matching.duration_seconds, 15);
    assert_eq!(matching.group_ids, vec!["grp-1"]);
}
