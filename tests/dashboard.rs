//! The whole dashboard served over HTTP with the local store.

use chrono::{Duration, Local, NaiveDate};
use reqwest::{Client, StatusCode, Url, redirect::Policy};
use taskboard::{
    DashboardState, router,
    store::{RestStore, SqliteStore, Store},
};
use tokio::net::TcpListener;

struct Dashboard {
    base: String,
    client: Client,
    store: Store,
}

impl Dashboard {
    async fn spawn() -> Self {
        Self::serve(Store::from(SqliteStore::connect("sqlite::memory:").await.unwrap())).await
    }

    async fn serve(store: Store) -> Self {
        let app = router(DashboardState::new(store.clone()));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = reqwest::ClientBuilder::new()
            .redirect(Policy::none())
            .build()
            .unwrap();

        Self {
            base: format!("http://{addr}"),
            client,
            store,
        }
    }

    async fn page(&self, query: &str) -> String {
        let response = self
            .client
            .get(format!("{}/{query}", self.base))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        response.text().await.unwrap()
    }

    async fn post(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(format!("{}{path}", self.base))
            .form(form)
            .send()
            .await
            .unwrap()
    }

    async fn add(&self, subject: &str, title: &str, deadline: NaiveDate) -> i64 {
        let deadline = deadline.to_string();
        let response = self
            .post(
                "/assignments",
                &[
                    ("subject", subject),
                    ("title", title),
                    ("deadline", deadline.as_str()),
                    ("priority", "medium"),
                    ("filter", "all"),
                ],
            )
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers()["location"],
            "/?filter=all&notice=added"
        );

        self.store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .find(|a| a.title == title)
            .unwrap()
            .id
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[tokio::test]
async fn empty_dashboard_invites_adding() {
    let dashboard = Dashboard::spawn().await;

    let page = dashboard.page("").await;

    assert!(page.contains("No assignments yet"));
    assert!(page.contains(r#"id="metric-incomplete">0<"#));
    assert!(page.contains(r#"id="metric-next-deadline">All clear<"#));
    assert!(page.contains(&format!(r#"name="deadline" value="{}""#, today())));
}

#[tokio::test]
async fn new_assignment_due_in_two_days() {
    let dashboard = Dashboard::spawn().await;
    let id = dashboard
        .add("Calculus", "HW3", today() + Duration::days(2))
        .await;

    let page = dashboard.page("?filter=all&notice=added").await;

    assert!(page.contains("Assignment added"));
    assert!(page.contains("Calculus"));
    assert!(page.contains("HW3"));
    assert!(page.contains(r#"id="metric-incomplete">1<"#));
    assert!(page.contains(r#"id="metric-next-deadline">2 days left<"#));
    assert!(page.contains(r#"data-status="due-in(2)""#));
    assert!(page.contains(r#"class="deadline deadline-near""#));
    assert!(page.contains(&format!(r#"id="assignment-{id}""#)));
}

#[tokio::test]
async fn overdue_assignment_turns_done_when_submitted() {
    let dashboard = Dashboard::spawn().await;
    let id = dashboard
        .add("Physics", "Lab report", today() - Duration::days(1))
        .await;

    let page = dashboard.page("").await;
    assert!(page.contains(r#"data-status="overdue(1)""#));
    assert!(page.contains("1 day overdue"));
    assert!(page.contains(r#"class="deadline deadline-overdue""#));
    assert!(page.contains(r#"id="metric-next-deadline">Overdue<"#));

    let response = dashboard
        .post(
            &format!("/assignments/{id}/submitted"),
            &[("submitted", "true"), ("filter", "all")],
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/?filter=all");

    let page = dashboard.page("").await;
    assert!(page.contains(r#"data-status="done""#));
    assert!(page.contains("<s>Lab report</s>"));
    assert!(!page.contains(r#"class="deadline deadline-overdue""#));
    assert!(page.contains(r#"id="metric-incomplete">0<"#));
    assert!(page.contains(r#"id="metric-next-deadline">All clear<"#));
}

#[tokio::test]
async fn filters_split_submitted_and_unsubmitted() {
    let dashboard = Dashboard::spawn().await;
    let done = dashboard
        .add("History", "Essay", today() + Duration::days(5))
        .await;
    dashboard
        .add("Biology", "Worksheet", today() + Duration::days(6))
        .await;
    dashboard.store.set_submitted(done, true).await.unwrap();

    let open = dashboard.page("?filter=unsubmitted").await;
    assert!(open.contains("Worksheet"));
    assert!(!open.contains("Essay"));

    let submitted = dashboard.page("?filter=submitted").await;
    assert!(submitted.contains("Essay"));
    assert!(!submitted.contains("Worksheet"));
    assert!(submitted.contains(r#"id="metric-incomplete">1<"#));

    let all = dashboard.page("?filter=all").await;
    assert!(all.contains("Essay"));
    assert!(all.contains("Worksheet"));
}

#[tokio::test]
async fn unknown_filter_falls_back_to_all() {
    let dashboard = Dashboard::spawn().await;
    let id = dashboard
        .add("Chemistry", "Titration", today() + Duration::days(10))
        .await;

    let page = dashboard.page("?filter=bogus").await;
    assert!(page.contains("Titration"));

    let response = dashboard
        .post(&format!("/assignments/{id}/delete"), &[("filter", "bogus")])
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers()["location"],
        "/?filter=all&notice=deleted"
    );
}

#[tokio::test]
async fn filter_with_no_matches_says_so() {
    let dashboard = Dashboard::spawn().await;
    dashboard
        .add("Biology", "Worksheet", today() + Duration::days(6))
        .await;

    let page = dashboard.page("?filter=submitted").await;

    assert!(page.contains("Nothing matches this filter"));
}

#[tokio::test]
async fn delete_removes_the_card() {
    let dashboard = Dashboard::spawn().await;
    let id = dashboard
        .add("Chemistry", "Titration", today() + Duration::days(10))
        .await;

    for _ in 0..2 {
        let response = dashboard
            .post(&format!("/assignments/{id}/delete"), &[("filter", "all")])
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers()["location"],
            "/?filter=all&notice=deleted"
        );
    }

    let page = dashboard.page("?filter=all&notice=deleted").await;
    assert!(page.contains("Assignment deleted"));
    assert!(!page.contains("Titration"));
    assert!(page.contains("No assignments yet"));
}

#[tokio::test]
async fn missing_title_is_reported_inline() {
    let dashboard = Dashboard::spawn().await;

    let response = dashboard
        .post(
            "/assignments",
            &[
                ("subject", "Calculus"),
                ("title", ""),
                ("deadline", "2025-04-12"),
            ],
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let page = response.text().await.unwrap();
    assert!(page.contains("title is required"));
    assert!(page.contains(r#"value="Calculus""#));
    assert!(dashboard.store.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn unreachable_store_still_renders_the_page() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let store = RestStore::new(Url::parse(&format!("http://{addr}")).unwrap(), "key".to_owned())
        .unwrap();
    let dashboard = Dashboard::serve(Store::from(store)).await;

    let page = dashboard.page("").await;

    assert!(page.contains("Could not load assignments"));
    assert!(page.contains("No assignments yet"));
    assert!(page.contains(r#"id="metric-incomplete">0<"#));
    assert!(page.contains(r#"name="subject""#));
}

#[tokio::test]
async fn toggling_a_missing_row_shows_a_banner() {
    let dashboard = Dashboard::spawn().await;

    let response = dashboard
        .post(
            "/assignments/99/submitted",
            &[("submitted", "true"), ("filter", "all")],
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let page = response.text().await.unwrap();
    assert!(page.contains("Could not update assignment 99"));
    assert!(page.contains("No assignments yet"));
}

#[tokio::test]
async fn details_show_link_and_markdown_memo() {
    let dashboard = Dashboard::spawn().await;
    let deadline = (today() + Duration::days(7)).to_string();
    let response = dashboard
        .post(
            "/assignments",
            &[
                ("subject", "Statistics"),
                ("title", "Project"),
                ("deadline", deadline.as_str()),
                ("priority", "high"),
                ("url", "https://lms.example.edu/stats"),
                ("memo", "Use **R** <b>only</b>"),
            ],
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let page = dashboard.page("").await;
    assert!(page.contains(r#"href="https://lms.example.edu/stats""#));
    assert!(page.contains("<strong>R</strong>"));
    assert!(!page.contains("<b>only</b>"));
    assert!(page.contains(r#"id="metric-high-priority">1<"#));
    assert!(page.contains(r#"title="High priority""#));
    assert!(!page.contains("No details"));
}
