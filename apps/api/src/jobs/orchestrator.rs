//! Job Orchestrator — runs one submission through every stage.
//!
//! Flow: validate form → create job (processing) → acquire reviews →
//!       extract insights → generate content → optional image →
//!       completed | error.
//!
//! Stages run strictly in sequence inside the submitting request. A failing
//! stage ends the job with its message; nothing is retried.

use std::sync::Arc;

use tracing::{error, info};

use crate::config::{MarketingCopyStyle, ReviewSource};
use crate::errors::AppError;
use crate::generation::content::generate_content;
use crate::generation::image::ImageSynthesizer;
use crate::generation::insights::extract_insights;
use crate::jobs::store::JobStore;
use crate::llm_client::TextGenerator;
use crate::models::{FormData, ImageAd, Insights, Job, Outputs};
use crate::reviews::{normalize_input, normalize_list, require_min_reviews, PlaceResolver};

/// How a job obtains its reviews.
pub enum ReviewAcquisition {
    /// Reviews come from the form.
    Manual,
    /// Reviews are fetched for the place behind `formData.mapsLink`.
    MapsLink(PlaceResolver),
}

impl ReviewAcquisition {
    pub fn source(&self) -> ReviewSource {
        match self {
            ReviewAcquisition::Manual => ReviewSource::Manual,
            ReviewAcquisition::MapsLink(_) => ReviewSource::MapsLink,
        }
    }
}

pub struct JobOrchestrator {
    store: Arc<dyn JobStore>,
    text: Arc<dyn TextGenerator>,
    reviews: ReviewAcquisition,
    images: Option<ImageSynthesizer>,
    copy_style: MarketingCopyStyle,
}

impl JobOrchestrator {
    pub fn new(
        store: Arc<dyn JobStore>,
        text: Arc<dyn TextGenerator>,
        reviews: ReviewAcquisition,
        copy_style: MarketingCopyStyle,
    ) -> Self {
        Self {
            store,
            text,
            reviews,
            images: None,
            copy_style,
        }
    }

    /// Enables the optional image stage.
    pub fn with_images(mut self, images: ImageSynthesizer) -> Self {
        self.images = Some(images);
        self
    }

    pub fn review_source(&self) -> ReviewSource {
        self.reviews.source()
    }

    /// Validates the form, runs the full pipeline and returns the terminal
    /// job record.
    ///
    /// Only form validation errors are returned as `Err`; once a job exists,
    /// stage failures are recorded on the job instead.
    pub async fn submit(&self, form: FormData) -> Result<Job, AppError> {
        form.validate(self.review_source())?;

        let job = Job::new(form);
        let job_id = job.id.clone();
        let form = job.form_data.clone();
        self.store.put(job);
        info!("Job {job_id}: created for '{}'", form.business_name.trim());

        match self.run_pipeline(&job_id, &form).await {
            Ok((insights, outputs)) => {
                self.store
                    .update(&job_id, &mut |job| job.complete(insights.clone(), outputs.clone()));
                info!("Job {job_id}: completed");
            }
            Err(e) => {
                let message = e.to_string();
                error!("Job {job_id}: failed: {message}");
                self.store.update(&job_id, &mut |job| job.fail(message.clone()));
            }
        }

        self.store.get(&job_id).ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!("Job {job_id} vanished from the store"))
        })
    }

    async fn run_pipeline(
        &self,
        job_id: &str,
        form: &FormData,
    ) -> Result<(Insights, Outputs), AppError> {
        let reviews = self.acquire_reviews(form).await?;
        require_min_reviews(&reviews)?;
        info!("Job {job_id}: {} reviews after normalization", reviews.len());

        let insights = extract_insights(self.text.as_ref(), &reviews).await?;
        self.store
            .update(job_id, &mut |job| job.insights = Some(insights.clone()));
        info!("Job {job_id}: insights extracted");

        let mut outputs =
            generate_content(self.text.as_ref(), form, &insights, self.copy_style).await?;
        info!("Job {job_id}: content generated");

        if let Some(images) = &self.images {
            let descriptor = outputs.image_ad.get_or_insert_with(|| ImageAd {
                cta: form.primary_cta().to_string(),
                ..Default::default()
            });
            let image_url = images.synthesize(form, &insights, descriptor).await?;
            descriptor.image_url = Some(image_url);
            info!("Job {job_id}: image synthesized");
        }

        Ok((insights, outputs))
    }

    async fn acquire_reviews(&self, form: &FormData) -> Result<Vec<String>, AppError> {
        match &self.reviews {
            ReviewAcquisition::Manual => Ok(form
                .reviews
                .as_ref()
                .map(normalize_input)
                .unwrap_or_default()),
            ReviewAcquisition::MapsLink(resolver) => {
                let link = form.maps_link.as_deref().unwrap_or_default();
                let place_id = resolver.resolve(link).await?;
                let fetched = resolver.fetch_reviews(&place_id).await?;
                Ok(normalize_list(&fetched))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::image::testing::{png, StubBackend};
    use crate::jobs::store::InMemoryJobStore;
    use crate::llm_client::testing::ScriptedGenerator;
    use crate::llm_client::LlmError;
    use crate::models::form::fixtures::form_with_reviews;
    use crate::models::job::JobStatus;
    use crate::models::MarketingCopy;
    use crate::reviews::place_resolver::testing::StubDirectory;

    const INSIGHTS_REPLY: &str = r#"{"repeatedPhrases": ["friendly staff"],
        "keyBenefits": ["fresh bread"], "trustSignals": ["family run"],
        "customerEmotions": ["welcomed"], "importantKeywords": ["bakery"],
        "reviewCount": 1000}"#;

    const CONTENT_REPLY: &str = r#"```json
{"json": {"headlines": ["Fresh Daily"], "bodyCopy": ["Baked at dawn."],
          "cta": "SIGN UP TODAY", "proofPhrases": ["friendly staff"]},
 "marketingCopy": {"campaignSummary": "Morning freshness", "ctaVariants": ["Swing By"]},
 "imageAd": {"headline": "Fresh", "subheadline": "Daily", "cta": "Tap Here",
             "designStyle": "warm, sunlit"}}
```"#;

    const REVIEWS: &str = "Friendly staff!\nFresh bread every morning.\nFriendly staff!\nFamily run and welcoming.\n\n";

    fn orchestrator(
        store: Arc<InMemoryJobStore>,
        generator: ScriptedGenerator,
    ) -> JobOrchestrator {
        JobOrchestrator::new(
            store,
            Arc::new(generator),
            ReviewAcquisition::Manual,
            MarketingCopyStyle::Structured,
        )
    }

    #[tokio::test]
    async fn test_completed_job_carries_forced_cta_and_true_count() {
        let store = Arc::new(InMemoryJobStore::new());
        let orch = orchestrator(
            store.clone(),
            ScriptedGenerator::replying(&[INSIGHTS_REPLY, CONTENT_REPLY]),
        );

        let job = orch.submit(form_with_reviews(REVIEWS)).await.unwrap();

        assert_eq!(job.status, JobStatus::Completed);
        assert!(job.error.is_none());
        assert_eq!(job.insights.as_ref().unwrap().review_count, 3);
        let outputs = job.outputs.as_ref().unwrap();
        assert_eq!(outputs.json.cta, "Visit Us");
        assert_eq!(outputs.image_ad.as_ref().unwrap().cta, "Visit Us");
        match &outputs.marketing_copy {
            MarketingCopy::Structured(copy) => assert_eq!(copy.cta_variants[0], "Visit Us"),
            MarketingCopy::Plain(_) => panic!("expected structured copy"),
        }
        assert_eq!(store.get(&job.id).unwrap().status, JobStatus::Completed);
    }

    #[tokio::test]
    async fn test_insufficient_reviews_ends_in_error_without_llm_call() {
        let store = Arc::new(InMemoryJobStore::new());
        let generator = Arc::new(ScriptedGenerator::replying(&[INSIGHTS_REPLY]));
        let orch = JobOrchestrator::new(
            store.clone(),
            generator.clone(),
            ReviewAcquisition::Manual,
            MarketingCopyStyle::Plain,
        );

        let job = orch
            .submit(form_with_reviews("Great service!\ngreat service!\n"))
            .await
            .unwrap();

        assert_eq!(job.status, JobStatus::Error);
        assert!(job.error.as_deref().unwrap().contains("Insufficient reviews"));
        assert!(job.insights.is_none());
        assert!(generator.prompts.lock().is_empty());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_form_creates_no_job() {
        let store = Arc::new(InMemoryJobStore::new());
        let orch = orchestrator(store.clone(), ScriptedGenerator::replying(&[]));

        let mut form = form_with_reviews(REVIEWS);
        form.business_type.clear();
        form.marketing_goal.clear();
        form.target_audience.clear();
        form.platform.clear();
        form.brand_tone.clear();
        form.preferred_cta.clear();

        let err = orch.submit(form).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn test_parse_failure_discards_insights() {
        let store = Arc::new(InMemoryJobStore::new());
        let orch = orchestrator(
            store.clone(),
            ScriptedGenerator::replying(&[INSIGHTS_REPLY, "not json at all"]),
        );

        let job = orch.submit(form_with_reviews(REVIEWS)).await.unwrap();

        assert_eq!(job.status, JobStatus::Error);
        assert!(job.insights.is_none());
        assert!(job.outputs.is_none());
        assert!(job
            .error
            .as_deref()
            .unwrap()
            .starts_with("Could not parse model response"));
    }

    #[tokio::test]
    async fn test_missing_credential_is_reported_on_job() {
        let store = Arc::new(InMemoryJobStore::new());
        let orch = orchestrator(
            store,
            ScriptedGenerator::new(vec![Err(LlmError::MissingApiKey)]),
        );

        let job = orch.submit(form_with_reviews(REVIEWS)).await.unwrap();
        assert_eq!(job.status, JobStatus::Error);
        assert!(job.error.as_deref().unwrap().contains("ANTHROPIC_API_KEY"));
    }

    #[tokio::test]
    async fn test_image_stage_attaches_data_url() {
        let store = Arc::new(InMemoryJobStore::new());
        let backend = Arc::new(StubBackend::new(vec![("m3", Ok(png(b"img")))]));
        let orch = orchestrator(
            store,
            ScriptedGenerator::replying(&[INSIGHTS_REPLY, CONTENT_REPLY]),
        )
        .with_images(ImageSynthesizer::new(
            backend,
            vec!["m1".to_string(), "m2".to_string(), "m3".to_string()],
        ));

        let job = orch.submit(form_with_reviews(REVIEWS)).await.unwrap();

        assert_eq!(job.status, JobStatus::Completed);
        let image_ad = job.outputs.unwrap().image_ad.unwrap();
        assert_eq!(image_ad.image_url, Some(png(b"img").to_data_url()));
        assert_eq!(image_ad.cta, "Visit Us");
    }

    #[tokio::test]
    async fn test_image_exhaustion_fails_job() {
        let store = Arc::new(InMemoryJobStore::new());
        let backend = Arc::new(StubBackend::new(vec![]));
        let orch = orchestrator(
            store,
            ScriptedGenerator::replying(&[INSIGHTS_REPLY, CONTENT_REPLY]),
        )
        .with_images(ImageSynthesizer::new(backend, vec!["m1".to_string()]));

        let job = orch.submit(form_with_reviews(REVIEWS)).await.unwrap();
        assert_eq!(job.status, JobStatus::Error);
        assert!(job
            .error
            .as_deref()
            .unwrap()
            .contains("m1: model is still loading"));
    }

    #[tokio::test]
    async fn test_maps_link_mode_fetches_reviews() {
        let store = Arc::new(InMemoryJobStore::new());
        let directory = Arc::new(StubDirectory::new(
            None,
            &["Lovely cakes", "Lovely cakes", "Kind owners", "Quick service", ""],
        ));
        let generator = Arc::new(ScriptedGenerator::replying(&[INSIGHTS_REPLY, CONTENT_REPLY]));
        let orch = JobOrchestrator::new(
            store,
            generator.clone(),
            ReviewAcquisition::MapsLink(PlaceResolver::new(directory.clone())),
            MarketingCopyStyle::Structured,
        );

        let mut form = form_with_reviews("");
        form.reviews = None;
        form.maps_link = Some("https://maps.google.com/?place_id=ChIJabc123xyz".to_string());

        let job = orch.submit(form).await.unwrap();

        assert_eq!(job.status, JobStatus::Completed);
        assert_eq!(job.insights.unwrap().review_count, 3);
        assert!(directory.searches.lock().is_empty());
        assert!(generator.prompts.lock()[0].contains("Lovely cakes\n\nKind owners"));
    }

    #[tokio::test]
    async fn test_maps_link_mode_invalid_link() {
        let store = Arc::new(InMemoryJobStore::new());
        let orch = JobOrchestrator::new(
            store,
            Arc::new(ScriptedGenerator::replying(&[])),
            ReviewAcquisition::MapsLink(PlaceResolver::new(Arc::new(StubDirectory::new(
                None,
                &[],
            )))),
            MarketingCopyStyle::Plain,
        );

        let mut form = form_with_reviews("");
        form.maps_link = Some("https://www.google.com/maps".to_string());

        let job = orch.submit(form).await.unwrap();
        assert_eq!(job.status, JobStatus::Error);
        assert!(job.error.unwrap().starts_with("Invalid Maps link"));
    }
}
