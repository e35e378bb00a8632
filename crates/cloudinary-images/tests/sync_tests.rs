use std::sync::Arc;

use cloudinary_images::test_support::{Call, FakeCloud};
use cloudinary_images::{
    AdminError, Crop, HorizontalAnchor, ImageSizeSpec, SyncError, VerticalAnchor, sync,
};

fn thumbnail() -> ImageSizeSpec {
    ImageSizeSpec::new("thumbnail", 150, 150, Crop::Hard)
}

#[tokio::test]
async fn creates_missing_hard_cropped_thumbnail() {
    let cloud = FakeCloud::new();

    let errors = sync(&[thumbnail()], &cloud).await;

    assert!(errors.is_empty());
    assert_eq!(
        cloud.calls(),
        vec![
            Call::Exists("thumbnail".into()),
            Call::Create("thumbnail".into(), "c_crop,ar_1/w_150,h_150".into()),
        ]
    );
}

#[tokio::test]
async fn updates_existing_transformation() {
    let cloud = FakeCloud::new().with_transformation("thumbnail");

    let errors = sync(&[thumbnail()], &cloud).await;

    assert!(errors.is_empty());
    assert_eq!(
        cloud.writes(),
        vec![Call::Update(
            "thumbnail".into(),
            "c_crop,ar_1/w_150,h_150".into()
        )]
    );
}

#[tokio::test]
async fn width_only_size_keeps_leading_separator() {
    let cloud = FakeCloud::new();
    let spec = ImageSizeSpec::new("custom", 300, 0, Crop::None);

    let errors = sync(&[spec], &cloud).await;

    assert!(errors.is_empty());
    assert_eq!(
        cloud.writes(),
        vec![Call::Create("custom".into(), "/w_300".into())]
    );
}

#[tokio::test]
async fn anchored_crop_sends_ratio_and_gravity() {
    let cloud = FakeCloud::new();
    let spec = ImageSizeSpec::new(
        "banner",
        200,
        100,
        Crop::Anchored(HorizontalAnchor::Left, VerticalAnchor::Top),
    );

    sync(&[spec], &cloud).await;

    assert_eq!(
        cloud.writes(),
        vec![Call::Create(
            "banner".into(),
            "c_crop,ar_2.00,g_north_west/w_200,h_100".into()
        )]
    );
}

#[tokio::test]
async fn unsized_spec_is_skipped_without_remote_calls() {
    let cloud = FakeCloud::new();
    let spec = ImageSizeSpec::new("empty", 0, 0, Crop::None);

    let errors = sync(&[spec], &cloud).await;

    assert_eq!(errors, vec![SyncError::new(400, "empty has no size information")]);
    assert!(cloud.calls().is_empty());
}

#[tokio::test]
async fn failure_does_not_block_later_sizes() {
    let cloud = FakeCloud::new().rejecting("a", 401, "Invalid credentials");
    let specs = [
        ImageSizeSpec::new("a", 100, 100, Crop::None),
        ImageSizeSpec::new("b", 200, 200, Crop::None),
    ];

    let errors = sync(&specs, &cloud).await;

    assert_eq!(
        errors,
        vec![SyncError::new(
            401,
            "Error creating/updating transformation for a: Invalid credentials"
        )]
    );
    assert_eq!(
        cloud.writes(),
        vec![
            Call::Create("a".into(), "/w_100,h_100".into()),
            Call::Create("b".into(), "/w_200,h_200".into()),
        ]
    );
    assert!(cloud.exists_now("b"));
}

#[tokio::test]
async fn errors_follow_input_order() {
    let cloud = FakeCloud::new()
        .rejecting("first", 500, "Internal Server Error")
        .rejecting("third", 409, "Conflict");
    let specs = [
        ImageSizeSpec::new("first", 10, 10, Crop::None),
        ImageSizeSpec::new("second", 0, 0, Crop::None),
        ImageSizeSpec::new("third", 30, 30, Crop::None),
        ImageSizeSpec::new("fourth", 40, 40, Crop::None),
    ];

    let errors = sync(&specs, &cloud).await;

    let statuses: Vec<u16> = errors.iter().map(|e| e.status).collect();
    assert_eq!(statuses, vec![500, 400, 409]);
    assert!(errors[1].message.starts_with("second"));
}

#[tokio::test]
async fn transport_failure_is_recorded_and_loop_continues() {
    let cloud = FakeCloud::new().unreachable("medium");
    let specs = [
        ImageSizeSpec::new("medium", 300, 300, Crop::None),
        ImageSizeSpec::new("large", 1024, 1024, Crop::None),
    ];

    let errors = sync(&specs, &cloud).await;

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].status, AdminError::NO_RESPONSE);
    assert!(
        errors[0]
            .message
            .starts_with("Error creating/updating transformation for medium:")
    );
    assert_eq!(
        cloud.writes(),
        vec![Call::Create("large".into(), "/w_1024,h_1024".into())]
    );
}

#[tokio::test]
async fn second_run_updates_what_the_first_created() {
    let cloud = Arc::new(FakeCloud::new());
    let specs = [thumbnail()];

    sync(&specs, cloud.as_ref()).await;
    sync(&specs, cloud.as_ref()).await;

    let writes = cloud.writes();
    assert!(matches!(writes[0], Call::Create(..)));
    assert!(matches!(writes[1], Call::Update(..)));
}

#[tokio::test]
async fn empty_input_makes_no_calls() {
    let cloud = FakeCloud::new();
    let errors = sync(&[], &cloud).await;
    assert!(errors.is_empty());
    assert!(cloud.calls().is_empty());
}
