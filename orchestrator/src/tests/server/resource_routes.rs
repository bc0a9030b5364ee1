use std::collections::HashMap;

use rstest::rstest;

use crate::server::types::SimpleResponse;
use crate::tests::common::{build_record, TestConfigBuilder, TestContext};
use crate::types::jobs::record::JobRecord;
use crate::types::jobs::resource_id::ResourceId;
use crate::types::jobs::types::JobStatus;

fn bare(resource_id: &ResourceId) -> &str {
    resource_id.as_str().trim_start_matches("resource_id-")
}

#[rstest]
#[case("tom")]
#[case("root")]
#[tokio::test]
async fn unknown_resource_is_a_bad_request_for_every_role(#[case] caller: &str) {
    let ctx = TestContext::start(TestConfigBuilder::new()).await;

    let response = ctx
        .client
        .get(ctx.url("/users/tom/resources/resource_id-missing"))
        .header("x-user-id", caller)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
    let body: SimpleResponse = response.json().await.unwrap();
    assert_eq!(body.status, "error");
    assert_eq!(body.message, "Resource does not exist");
}

#[tokio::test]
async fn canonical_id_returns_the_latest_iteration_and_replays_the_stored_code() {
    let ctx = TestContext::start(TestConfigBuilder::new()).await;
    let resource_id = ResourceId::generate();
    ctx.store.seed("tom", &resource_id, 1, build_record("tom", &resource_id, 1, JobStatus::Error, 3, 10.0));
    let mut latest = build_record("tom", &resource_id, 2, JobStatus::Error, 5, 20.0);
    latest.http_code = 400;
    ctx.store.seed("tom", &resource_id, 2, latest);

    let response = ctx
        .client
        .get(ctx.url(&format!("/users/tom/resources/{resource_id}")))
        .header("x-user-id", "tom")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
    let record: JobRecord = response.json().await.unwrap();
    assert_eq!(record.iteration, Some(2));
    assert_eq!(record.process_log.len(), 1);
}

#[tokio::test]
async fn bare_id_returns_the_merged_all_iterations_view() {
    let ctx = TestContext::start(TestConfigBuilder::new()).await;
    let resource_id = ResourceId::generate();
    ctx.store.seed("tom", &resource_id, 1, build_record("tom", &resource_id, 1, JobStatus::Error, 3, 10.0));
    ctx.store.seed("tom", &resource_id, 2, build_record("tom", &resource_id, 2, JobStatus::Error, 5, 20.0));

    let response = ctx
        .client
        .get(ctx.url(&format!("/users/tom/resources/{}", bare(&resource_id))))
        .header("x-user-id", "tom")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let record: JobRecord = response.json().await.unwrap();
    // Base is the latest iteration, logs are concatenated across both.
    assert_eq!(record.iteration, Some(2));
    assert_eq!(record.process_log.len(), 2);
    assert_eq!(record.process_chain_list.len(), 2);
}

#[rstest]
#[case(JobStatus::Accepted)]
#[case(JobStatus::Finished)]
#[tokio::test]
async fn resume_is_rejected_for_unresumable_statuses(#[case] status: JobStatus) {
    let ctx = TestContext::start(TestConfigBuilder::new()).await;
    let resource_id = ResourceId::generate();
    ctx.store.seed("tom", &resource_id, 1, build_record("tom", &resource_id, 1, status, 3, 10.0));

    let response = ctx
        .client
        .put(ctx.url(&format!("/users/tom/resources/{resource_id}")))
        .header("x-user-id", "tom")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 404);
    let body: SimpleResponse = response.json().await.unwrap();
    assert_eq!(body.message, format!("Resource is {status}, resume not possible"));
    assert!(ctx.dispatcher.dispatched().is_empty());
}

#[tokio::test]
async fn resume_is_rejected_when_interim_results_are_disabled() {
    let ctx = TestContext::start(TestConfigBuilder::new().with_interim_results_disabled()).await;
    let resource_id = ResourceId::generate();
    ctx.store.seed("tom", &resource_id, 1, build_record("tom", &resource_id, 1, JobStatus::Error, 3, 10.0));

    let response = ctx
        .client
        .put(ctx.url(&format!("/users/tom/resources/{resource_id}")))
        .header("x-user-id", "tom")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 404);
    let body: SimpleResponse = response.json().await.unwrap();
    assert_eq!(body.message, "Interim results are not enabled in the configuration");
}

#[tokio::test]
async fn resume_of_a_stalled_running_resource_flips_it_to_error() {
    let ctx = TestContext::start(TestConfigBuilder::new()).await;
    let resource_id = ResourceId::generate();
    ctx.store.seed("tom", &resource_id, 1, build_record("tom", &resource_id, 1, JobStatus::Running, 3, 42.0));

    let put = ctx
        .client
        .put(ctx.url(&format!("/users/tom/resources/{resource_id}")))
        .header("x-user-id", "tom")
        .send()
        .await
        .unwrap();
    assert_eq!(put.status().as_u16(), 404);

    // The recovery side effect is observable on the next status query.
    let get = ctx
        .client
        .get(ctx.url(&format!("/users/tom/resources/{resource_id}")))
        .header("x-user-id", "tom")
        .send()
        .await
        .unwrap();
    let record: JobRecord = get.json().await.unwrap();
    assert_eq!(record.status, JobStatus::Error);
}

#[tokio::test]
async fn resume_seeds_and_dispatches_the_next_iteration() {
    let ctx = TestContext::start(TestConfigBuilder::new()).await;
    let resource_id = ResourceId::generate();
    ctx.store.seed("tom", &resource_id, 1, build_record("tom", &resource_id, 1, JobStatus::Error, 3, 10.0));
    ctx.store.seed("tom", &resource_id, 2, build_record("tom", &resource_id, 2, JobStatus::Error, 5, 20.0));
    ctx.store.seed("tom", &resource_id, 3, build_record("tom", &resource_id, 3, JobStatus::Error, 4, 30.0));

    let response = ctx
        .client
        .put(ctx.url(&format!("/users/tom/resources/{resource_id}")))
        .header("x-user-id", "tom")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let record: JobRecord = response.json().await.unwrap();
    assert_eq!(record.status, JobStatus::Accepted);
    assert_eq!(record.iteration, Some(4));

    let dispatched = ctx.dispatcher.dispatched();
    assert_eq!(dispatched.len(), 1);
    assert_eq!(dispatched[0].descriptor.pc_step, 9);
    assert_eq!(dispatched[0].descriptor.iteration, 4);
    assert_eq!(dispatched[0].timeout.as_secs(), 600);

    assert!(ctx.store.record("tom", &resource_id, 4).is_some());
}

#[tokio::test]
async fn terminating_a_finished_resource_is_an_accepted_noop() {
    let ctx = TestContext::start(TestConfigBuilder::new()).await;
    let resource_id = ResourceId::generate();
    ctx.store.seed("tom", &resource_id, 1, build_record("tom", &resource_id, 1, JobStatus::Finished, 5, 60.0));

    let response = ctx
        .client
        .delete(ctx.url(&format!("/users/tom/resources/{resource_id}")))
        .header("x-user-id", "tom")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let body: SimpleResponse = response.json().await.unwrap();
    assert_eq!(body.status, "accepted");
    assert_eq!(body.message, "Termination request committed");
    assert_eq!(ctx.store.termination_requests().len(), 1);

    // Termination is a request, not a state change.
    let untouched = ctx.store.record("tom", &resource_id, 1).unwrap();
    assert_eq!(untouched.record.status, JobStatus::Finished);
}

#[tokio::test]
async fn terminating_an_unknown_resource_is_a_bad_request() {
    let ctx = TestContext::start(TestConfigBuilder::new()).await;

    let response = ctx
        .client
        .delete(ctx.url("/users/tom/resources/resource_id-missing"))
        .header("x-user-id", "tom")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
    assert!(ctx.store.termination_requests().is_empty());
}

#[tokio::test]
async fn listing_filters_by_status_and_caps_the_result() {
    let ctx = TestContext::start(TestConfigBuilder::new()).await;
    for status in [JobStatus::Accepted, JobStatus::Running, JobStatus::Error, JobStatus::Finished] {
        let resource_id = ResourceId::generate();
        ctx.store.seed("tom", &resource_id, 1, build_record("tom", &resource_id, 1, status, 3, 10.0));
    }

    let all: serde_json::Value = ctx
        .client
        .get(ctx.url("/users/tom/resources?type=all"))
        .header("x-user-id", "tom")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(all["resource_list"].as_array().unwrap().len(), 4);

    // Case-insensitive exact status match.
    let errors: serde_json::Value = ctx
        .client
        .get(ctx.url("/users/tom/resources?type=ERROR"))
        .header("x-user-id", "tom")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let errors = errors["resource_list"].as_array().unwrap().clone();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["status"], "error");

    let capped: serde_json::Value = ctx
        .client
        .get(ctx.url("/users/tom/resources?num=2"))
        .header("x-user-id", "tom")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(capped["resource_list"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn bulk_termination_only_touches_accepted_and_running_resources() {
    let ctx = TestContext::start(TestConfigBuilder::new()).await;
    for status in [JobStatus::Accepted, JobStatus::Running, JobStatus::Error, JobStatus::Finished] {
        let resource_id = ResourceId::generate();
        ctx.store.seed("tom", &resource_id, 1, build_record("tom", &resource_id, 1, status, 3, 10.0));
    }

    let response = ctx
        .client
        .delete(ctx.url("/users/tom/resources"))
        .header("x-user-id", "tom")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let body: SimpleResponse = response.json().await.unwrap();
    assert_eq!(body.status, "finished");
    assert_eq!(body.message, "Successfully sent 2 termination requests");
    assert_eq!(ctx.store.termination_requests().len(), 2);
}

#[tokio::test]
async fn iteration_status_maps_the_record_by_iteration() {
    let ctx = TestContext::start(TestConfigBuilder::new()).await;
    let resource_id = ResourceId::generate();
    ctx.store.seed("tom", &resource_id, 1, build_record("tom", &resource_id, 1, JobStatus::Error, 3, 10.0));
    ctx.store.seed("tom", &resource_id, 2, build_record("tom", &resource_id, 2, JobStatus::Running, 2, 5.0));

    let response = ctx
        .client
        .get(ctx.url(&format!("/users/tom/resources/{}/iterations/2", bare(&resource_id))))
        .header("x-user-id", "tom")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let body: HashMap<String, JobRecord> = response.json().await.unwrap();
    assert_eq!(body.len(), 1);
    assert_eq!(body["2"].status, JobStatus::Running);

    let missing = ctx
        .client
        .get(ctx.url(&format!("/users/tom/resources/{}/iterations/7", bare(&resource_id))))
        .header("x-user-id", "tom")
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status().as_u16(), 400);
}

#[rstest]
#[case("gus", "Wrong user.")]
#[case("bob", "Wrong user group.")]
#[tokio::test]
async fn cross_user_access_is_unauthorized(#[case] caller: &str, #[case] detail: &str) {
    let ctx = TestContext::start(TestConfigBuilder::new()).await;
    let resource_id = ResourceId::generate();
    ctx.store.seed("tom", &resource_id, 1, build_record("tom", &resource_id, 1, JobStatus::Error, 3, 10.0));

    let response = ctx
        .client
        .get(ctx.url(&format!("/users/tom/resources/{resource_id}")))
        .header("x-user-id", caller)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 401);
    let body: SimpleResponse = response.json().await.unwrap();
    assert!(body.message.ends_with(detail), "unexpected message: {}", body.message);
}

#[tokio::test]
async fn requests_without_a_caller_identity_are_unauthorized() {
    let ctx = TestContext::start(TestConfigBuilder::new()).await;

    let response = ctx.client.get(ctx.url("/users/tom/resources")).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn superadmin_reads_across_users() {
    let ctx = TestContext::start(TestConfigBuilder::new()).await;
    let resource_id = ResourceId::generate();
    ctx.store.seed("tom", &resource_id, 1, build_record("tom", &resource_id, 1, JobStatus::Error, 3, 10.0));

    let response = ctx
        .client
        .get(ctx.url(&format!("/users/tom/resources/{resource_id}")))
        .header("x-user-id", "root")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
}
