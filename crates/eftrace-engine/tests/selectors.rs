use eftrace_engine::selectors::{
    backend_error_rate, cache_hit_rate, quests_by_status, sessions_by_start, top_endpoints,
};
use eftrace_engine::{DataPoint, QuestStatus, derive_statistics, downsample};
use eftrace_testing::{ResultBuilder, event};
use eftrace_types::LogType;

#[test]
fn test_downsample_invariants() {
    let data: Vec<DataPoint> = (0..500)
        .map(|i| DataPoint::new(i as f64, (i as f64 / 7.0).sin() * 100.0))
        .collect();

    for max in [0, 1, 2, 3, 17, 250, 499, 500, 1000] {
        let out = downsample(&data, max);
        assert_eq!(out.len(), data.len().min(max), "max = {}", max);
        if max >= 2 {
            assert_eq!(out.first(), data.first());
            assert_eq!(out.last(), data.last());
        }
        if max >= data.len() {
            assert_eq!(out, data);
        }
    }
}

#[test]
fn test_statistics_queries() {
    let backend = ResultBuilder::new(LogType::Backend)
        .session("2024.03.13_09-01-02_0.14.1.2.29197")
        .events([
            event(LogType::Backend).family("request").field("url", "/client/items"),
            event(LogType::Backend).family("request").field("url", "/client/items"),
            event(LogType::Backend).family("request").field("url", "/client/game/start"),
            event(LogType::Backend).family("request").field("url", "/client/locale"),
            event(LogType::Backend).family("transport_error"),
        ])
        .build();
    let cache = ResultBuilder::new(LogType::BackendCache)
        .session("2024.03.12_14-22-58_0.14.1.2.29197")
        .events([
            event(LogType::BackendCache).field("cacheHit", false).at(-60),
            event(LogType::BackendCache),
            event(LogType::BackendCache),
            event(LogType::BackendCache),
        ])
        .build();
    let quests = ResultBuilder::new(LogType::Application)
        .events([
            event(LogType::Application).message("Quest 5936d90786f7742b1420ba5b completed"),
            event(LogType::Application).message("Quest 59674cd986f7744ab26e32f2 started"),
        ])
        .build();

    let stats = derive_statistics(&[backend, cache, quests]);

    assert_eq!(backend_error_rate(&stats.backend), 25.0);
    assert_eq!(cache_hit_rate(&stats.cache), 75.0);

    let top = top_endpoints(&stats, 1);
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].key, "/client/items");
    assert_eq!(top[0].percentage, 50.0);

    let completed = quests_by_status(&stats, QuestStatus::Completed);
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].id, "5936d90786f7742b1420ba5b");

    let ordered: Vec<&str> = sessions_by_start(&stats).iter().map(|s| s.id.as_str()).collect();
    assert_eq!(
        ordered,
        vec![
            "2024.03.12_14-22-58_0.14.1.2.29197",
            "2024.03.13_09-01-02_0.14.1.2.29197",
            "unknown",
        ]
    );
}
