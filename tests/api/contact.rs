use serde_json::json;
use wiremock::matchers::{any, body_partial_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::{spawn_app, valid_body, TestApp};

async fn email_provider_responds(app: &TestApp, status: u16, expected_calls: u64) {
    Mock::given(path("/v3/smtp/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(status))
        .named("Send notification email")
        .expect(expected_calls)
        .mount(&app.email_server)
        .await;
}

async fn mailing_list_responds(app: &TestApp, response: ResponseTemplate, expected_calls: u64) {
    Mock::given(path(app.mailing_list_path()))
        .and(method("POST"))
        .respond_with(response)
        .named("Subscribe to mailing list")
        .expect(expected_calls)
        .mount(&app.mailing_list_server)
        .await;
}

async fn no_provider_is_called(app: &TestApp) {
    for server in [
        &app.email_server,
        &app.recaptcha_server,
        &app.mailing_list_server,
    ] {
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(server)
            .await;
    }
}

fn list_accepted() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"new_members": [{}], "errors": [], "error_count": 0}))
}

#[tokio::test]
async fn the_contact_form_is_rendered_empty() {
    let app = spawn_app().await;

    let response = app.get_contact_form().await;

    assert_eq!(response.status().as_u16(), 200);
    let html = response.text().await.unwrap();
    assert!(html.contains(r#"name="first_name" value="""#));
    assert!(html.contains(&app.recaptcha_site_key));
    assert!(!html.contains("Form submitted successfully!"));
    assert!(!html.contains("field-error"));
}

#[tokio::test]
async fn a_short_first_name_returns_400_without_calling_any_provider() {
    let app = spawn_app().await;
    no_provider_is_called(&app).await;
    let body = valid_body().replace("first_name=Ursula", "first_name=Al");

    let response = app.post_contact(body).await;

    assert_eq!(response.status().as_u16(), 400);
    let html = response.text().await.unwrap();
    assert!(html.contains("First name must be at least 3 characters long"));
}

#[tokio::test]
async fn an_invalid_email_returns_400_with_an_email_error() {
    let app = spawn_app().await;
    no_provider_is_called(&app).await;
    let body = valid_body().replace("email=ursula_le_guin%40gmail.com", "email=ursula-at-home");

    let response = app.post_contact(body).await;

    assert_eq!(response.status().as_u16(), 400);
    let html = response.text().await.unwrap();
    assert!(html.contains("Email is not valid"));
}

#[tokio::test]
async fn returns_400_when_required_fields_are_missing() {
    let app = spawn_app().await;
    no_provider_is_called(&app).await;
    let test_cases = vec![
        ("last_name=Le%20Guin&email=ursula%40example.com&message=Hi", "First name is required"),
        ("first_name=Ursula&email=ursula%40example.com&message=Hi", "Last name is required"),
        ("first_name=Ursula&last_name=Le%20Guin&message=Hi", "Email is not valid"),
        ("first_name=Ursula&last_name=Le%20Guin&email=ursula%40example.com", "Message is required"),
        ("", "First name is required"),
    ];

    for (body, expected_message) in test_cases {
        let response = app.post_contact(body.into()).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 Bad Request when the payload was `{}`.",
            body
        );
        let html = response.text().await.unwrap();
        assert!(html.contains(expected_message), "payload `{body}`");
    }
}

#[tokio::test]
async fn field_errors_and_a_missing_token_are_reported_together() {
    let app = spawn_app().await;
    no_provider_is_called(&app).await;
    let body = "first_name=Al&last_name=Le%20Guin&email=ursula%40example.com&message=Hi";

    let response = app.post_contact(body.into()).await;

    assert_eq!(response.status().as_u16(), 400);
    let html = response.text().await.unwrap();
    assert!(html.contains("First name must be at least 3 characters long"));
    assert!(html.contains("reCAPTCHA verification failed"));
}

#[tokio::test]
async fn a_missing_token_returns_400_and_sends_no_email() {
    let app = spawn_app().await;
    no_provider_is_called(&app).await;
    let body = valid_body().replace("recaptcha_token=", "other=");

    let response = app.post_contact(body).await;

    assert_eq!(response.status().as_u16(), 400);
    let html = response.text().await.unwrap();
    assert!(html.contains("reCAPTCHA verification failed"));
}

#[tokio::test]
async fn a_score_of_exactly_one_half_is_accepted() {
    let app = spawn_app().await;
    app.recaptcha_scores(0.5).await;
    email_provider_responds(&app, 201, 1).await;

    let response = app.post_contact(valid_body()).await;

    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn a_low_score_returns_400_and_sends_no_email() {
    let app = spawn_app().await;
    app.recaptcha_scores(0.3).await;
    email_provider_responds(&app, 201, 0).await;

    let response = app.post_contact(valid_body()).await;

    assert_eq!(response.status().as_u16(), 400);
    let html = response.text().await.unwrap();
    assert!(html.contains("Suspicious activity detected. Please try again."));
    assert!(html.contains(r#"value="Ursula""#));
}

#[tokio::test]
async fn an_unreachable_verification_provider_fails_closed() {
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&app.recaptcha_server)
        .await;
    email_provider_responds(&app, 201, 0).await;

    let response = app.post_contact(valid_body()).await;

    assert_eq!(response.status().as_u16(), 400);
    let html = response.text().await.unwrap();
    assert!(html.contains("reCAPTCHA verification failed"));
}

#[tokio::test]
async fn a_valid_submission_without_newsletter_sends_one_email_and_clears_the_form() {
    let app = spawn_app().await;
    app.recaptcha_scores(0.9).await;
    email_provider_responds(&app, 201, 1).await;
    mailing_list_responds(&app, list_accepted(), 0).await;

    let response = app.post_contact(valid_body()).await;

    assert_eq!(response.status().as_u16(), 200);
    let html = response.text().await.unwrap();
    assert!(html.contains("Form submitted successfully!"));
    assert!(html.contains(r#"name="first_name" value="""#));
    assert!(!html.contains("Ursula"));
}

#[tokio::test]
async fn the_notification_goes_to_the_operator_and_describes_the_submission() {
    let app = spawn_app().await;
    app.recaptcha_scores(0.9).await;
    email_provider_responds(&app, 201, 1).await;
    let body = format!(
        "{}&phone=555-0100&service=Interior%20painting&service=Colour%20matching",
        valid_body()
    );

    app.post_contact(body).await;

    let requests = app.email_requests().await;
    let email = &requests[0];
    assert_eq!(email["sender"], email["to"][0]);
    assert_eq!(email["subject"], "You have a new message from Ursula Le Guin");
    let html = email["htmlContent"].as_str().unwrap();
    assert!(html.contains("ursula_le_guin@gmail.com"));
    assert!(html.contains("555-0100"));
    assert!(html.contains("Interior painting, Colour matching"));
    assert!(html.contains("Not specified"));
}

#[tokio::test]
async fn a_newsletter_opt_in_subscribes_the_contact() {
    let app = spawn_app().await;
    app.recaptcha_scores(0.9).await;
    email_provider_responds(&app, 201, 1).await;
    Mock::given(path(app.mailing_list_path()))
        .and(method("POST"))
        .and(header("Authorization", "apikey my-mailchimp-api-key"))
        .and(body_partial_json(json!({
            "members": [{
                "email_address": "ursula_le_guin@gmail.com",
                "status": "subscribed",
                "merge_fields": {"FNAME": "Ursula", "LNAME": "Le Guin"}
            }]
        })))
        .respond_with(list_accepted())
        .expect(1)
        .mount(&app.mailing_list_server)
        .await;

    let response = app.post_contact(format!("{}&newsletter=on", valid_body())).await;

    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn a_failing_mailing_list_does_not_change_the_outcome() {
    let app = spawn_app().await;
    app.recaptcha_scores(0.9).await;
    email_provider_responds(&app, 201, 1).await;
    mailing_list_responds(&app, ResponseTemplate::new(500), 1).await;

    let response = app.post_contact(format!("{}&newsletter=on", valid_body())).await;

    assert_eq!(response.status().as_u16(), 200);
    let html = response.text().await.unwrap();
    assert!(html.contains("Form submitted successfully!"));
}

#[tokio::test]
async fn a_failing_email_provider_returns_500_and_skips_the_mailing_list() {
    let app = spawn_app().await;
    app.recaptcha_scores(0.9).await;
    email_provider_responds(&app, 500, 1).await;
    mailing_list_responds(&app, list_accepted(), 0).await;

    let response = app.post_contact(format!("{}&newsletter=on", valid_body())).await;

    assert_eq!(response.status().as_u16(), 500);
    let html = response.text().await.unwrap();
    assert!(html.contains("Failed to send email. Try again later."));
    assert!(html.contains(r#"value="Ursula""#));
    assert!(!html.contains("Form submitted successfully!"));
}

#[tokio::test]
async fn a_repeated_checkbox_key_keeps_its_last_value() {
    let app = spawn_app().await;
    app.recaptcha_scores(0.9).await;
    email_provider_responds(&app, 201, 1).await;
    mailing_list_responds(&app, list_accepted(), 1).await;

    let response = app
        .post_contact(format!("{}&newsletter=off&newsletter=on", valid_body()))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let html = response.text().await.unwrap();
    assert!(html.contains("Form submitted successfully!"));
}

#[tokio::test]
async fn a_repeated_name_is_validated_like_any_other_value() {
    let app = spawn_app().await;
    no_provider_is_called(&app).await;
    let body = format!("{}&first_name=Al", valid_body());

    let response = app.post_contact(body).await;

    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(
        response.headers()["content-type"],
        "text/html; charset=utf-8"
    );
    let html = response.text().await.unwrap();
    assert!(html.contains("First name must be at least 3 characters long"));
    assert!(html.contains(r#"value="Al""#));
}

#[tokio::test]
async fn an_unreadable_body_renders_the_form_with_400() {
    let app = spawn_app().await;
    no_provider_is_called(&app).await;

    let response = app
        .api_client
        .post(&format!("{}/contact-us", &app.address))
        .header("Content-Type", "text/plain")
        .body(valid_body())
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(
        response.headers()["content-type"],
        "text/html; charset=utf-8"
    );
    let html = response.text().await.unwrap();
    assert!(html.contains("We could not read your submission. Please try again."));
    assert!(html.contains(r#"name="first_name" value="""#));
}
