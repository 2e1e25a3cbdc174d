//! Blog content admin: post list and create/edit form over a mock backend.

use std::cell::{Cell, RefCell};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::NaiveDate;
use salon_commerce::blog::{
    slugify, BlogCategory, BlogPost, PostFilter, PostMetrics, PostStats, PostStatus, TagSet,
};
use salon_commerce::ids::PostId;
use salon_commerce::CommerceError;
use salon_observability::StructuredLogger;

use crate::timer::Transient;

/// Longest excerpt the form accepts, in characters.
pub const MAX_EXCERPT_CHARS: usize = 300;

/// Storage for blog posts.
#[async_trait(?Send)]
pub trait BlogBackend {
    async fn list_posts(&self) -> Result<Vec<BlogPost>, CommerceError>;

    /// Insert or replace. Posts with an empty id get a fresh one.
    async fn save_post(&self, post: BlogPost) -> Result<BlogPost, CommerceError>;

    async fn delete_post(&self, id: &PostId) -> Result<(), CommerceError>;

    async fn toggle_featured(&self, id: &PostId) -> Result<BlogPost, CommerceError>;
}

/// In-memory backend with simulated latency. State dies with the value.
pub struct MockBlogBackend {
    posts: RefCell<Vec<BlogPost>>,
    latency: Duration,
    next_id: Cell<u64>,
}

impl MockBlogBackend {
    pub fn new(latency: Duration) -> Self {
        Self {
            posts: RefCell::new(Vec::new()),
            latency,
            next_id: Cell::new(1),
        }
    }

    /// Backend seeded with the demo posts.
    pub fn with_sample_posts(latency: Duration) -> Self {
        let posts = sample_posts();
        let backend = Self::new(latency);
        backend.next_id.set(posts.len() as u64 + 1);
        *backend.posts.borrow_mut() = posts;
        backend
    }

    async fn simulate_latency(&self) {
        #[cfg(not(target_arch = "wasm32"))]
        {
            if !self.latency.is_zero() {
                tokio::time::sleep(self.latency).await;
            }
        }
    }

    fn find(&self, id: &PostId) -> Result<BlogPost, CommerceError> {
        self.posts
            .borrow()
            .iter()
            .find(|p| &p.id == id)
            .cloned()
            .ok_or_else(|| CommerceError::PostNotFound(id.to_string()))
    }
}

#[async_trait(?Send)]
impl BlogBackend for MockBlogBackend {
    async fn list_posts(&self) -> Result<Vec<BlogPost>, CommerceError> {
        self.simulate_latency().await;
        Ok(self.posts.borrow().clone())
    }

    async fn save_post(&self, mut post: BlogPost) -> Result<BlogPost, CommerceError> {
        self.simulate_latency().await;
        if post.id.is_unsaved() {
            let n = self.next_id.get();
            self.next_id.set(n + 1);
            post.id = PostId::new(format!("post-{}", n));
        }

        let mut posts = self.posts.borrow_mut();
        match posts.iter_mut().find(|p| p.id == post.id) {
            Some(existing) => *existing = post.clone(),
            None => posts.push(post.clone()),
        }
        Ok(post)
    }

    async fn delete_post(&self, id: &PostId) -> Result<(), CommerceError> {
        self.simulate_latency().await;
        let mut posts = self.posts.borrow_mut();
        let before = posts.len();
        posts.retain(|p| &p.id != id);
        if posts.len() == before {
            return Err(CommerceError::PostNotFound(id.to_string()));
        }
        Ok(())
    }

    async fn toggle_featured(&self, id: &PostId) -> Result<BlogPost, CommerceError> {
        self.simulate_latency().await;
        let mut post = self.find(id)?;
        post.featured = !post.featured;
        if let Some(existing) = self.posts.borrow_mut().iter_mut().find(|p| &p.id == id) {
            existing.featured = post.featured;
        }
        Ok(post)
    }
}

#[allow(clippy::too_many_arguments)]
fn sample_post(
    id: &str,
    title: &str,
    category: BlogCategory,
    status: PostStatus,
    author: &str,
    tags: &[&str],
    date: Option<(i32, u32, u32)>,
    featured: bool,
    views: u64,
) -> BlogPost {
    BlogPost {
        id: PostId::new(id),
        title: title.to_string(),
        slug: slugify(title),
        excerpt: format!("{} from our stylists.", title),
        content: format!("{}. Our team shares what works in the salon and at home.", title),
        category,
        status,
        author: author.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        publish_date: date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
        featured,
        metrics: PostMetrics {
            views,
            likes: views / 10,
            comments: views / 50,
        },
    }
}

/// Demo data shown by the admin screens.
pub fn sample_posts() -> Vec<BlogPost> {
    vec![
        sample_post(
            "post-1",
            "Summer Hair Care Essentials",
            BlogCategory::HairCare,
            PostStatus::Published,
            "Sarah Johnson",
            &["summer", "haircare", "tips"],
            Some((2024, 6, 15)),
            true,
            1250,
        ),
        sample_post(
            "post-2",
            "The Ultimate Skincare Routine",
            BlogCategory::Skincare,
            PostStatus::Published,
            "Emily Chen",
            &["skincare", "routine"],
            Some((2024, 5, 28)),
            false,
            980,
        ),
        sample_post(
            "post-3",
            "Fall Nail Art Trends",
            BlogCategory::Nails,
            PostStatus::Scheduled,
            "Maria Garcia",
            &["nails", "trends", "fall"],
            Some((2024, 9, 1)),
            false,
            0,
        ),
        sample_post(
            "post-4",
            "Mindful Beauty Rituals",
            BlogCategory::Wellness,
            PostStatus::Draft,
            "Sarah Johnson",
            &["wellness"],
            None,
            false,
            0,
        ),
    ]
}

/// The admin post list.
pub struct BlogAdminList {
    posts: Vec<BlogPost>,
    filter: PostFilter,
    loading: bool,
    logger: StructuredLogger,
}

impl BlogAdminList {
    pub fn new(logger: StructuredLogger) -> Self {
        Self {
            posts: Vec::new(),
            filter: PostFilter::default(),
            loading: false,
            logger: logger.for_view("blog-admin"),
        }
    }

    pub async fn load<B: BlogBackend + ?Sized>(&mut self, backend: &B) -> Result<(), CommerceError> {
        self.loading = true;
        let result = backend.list_posts().await;
        self.loading = false;
        self.posts = result?;
        self.logger
            .info_builder("posts loaded")
            .field_i64("count", self.posts.len() as i64)
            .emit();
        Ok(())
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn filter(&self) -> &PostFilter {
        &self.filter
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.search = search.into();
    }

    /// `None` means all categories.
    pub fn set_category(&mut self, category: Option<BlogCategory>) {
        self.filter.category = category;
    }

    /// `None` means all statuses.
    pub fn set_status(&mut self, status: Option<PostStatus>) {
        self.filter.status = status;
    }

    /// Posts passing the filter, newest first.
    pub fn visible(&self) -> Vec<&BlogPost> {
        self.filter.apply(&self.posts)
    }

    pub fn stats(&self) -> PostStats {
        PostStats::from_posts(&self.posts)
    }

    pub fn posts(&self) -> &[BlogPost] {
        &self.posts
    }

    pub async fn toggle_featured<B: BlogBackend + ?Sized>(
        &mut self,
        backend: &B,
        id: &PostId,
    ) -> Result<bool, CommerceError> {
        let updated = backend.toggle_featured(id).await?;
        let featured = updated.featured;
        self.replace(updated);
        Ok(featured)
    }

    pub async fn delete<B: BlogBackend + ?Sized>(
        &mut self,
        backend: &B,
        id: &PostId,
    ) -> Result<(), CommerceError> {
        backend.delete_post(id).await?;
        self.posts.retain(|p| &p.id != id);
        self.logger.info_builder("post deleted").field("id", id.as_str()).emit();
        Ok(())
    }

    /// Put a saved post into the list, replacing any older copy.
    pub fn replace(&mut self, post: BlogPost) {
        match self.posts.iter_mut().find(|p| p.id == post.id) {
            Some(existing) => *existing = post,
            None => self.posts.push(post),
        }
    }
}

/// Whether the form creates a post or edits one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(PostId),
}

/// Editable fields of a post.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PostDraft {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: BlogCategory,
    pub status: PostStatus,
    pub author: String,
    pub publish_date: Option<NaiveDate>,
    pub featured: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostField {
    Title,
    Excerpt,
    Content,
    PublishDate,
}

/// A validation failure on one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: PostField,
    pub message: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitError {
    /// A save is already in flight.
    AlreadySaving,
    Invalid(Vec<FieldError>),
    Backend(CommerceError),
}

/// The create/edit form.
pub struct PostForm {
    mode: FormMode,
    pub draft: PostDraft,
    tags: TagSet,
    metrics: PostMetrics,
    saving: bool,
    errors: Vec<FieldError>,
    notice: Transient<&'static str>,
    logger: StructuredLogger,
}

impl PostForm {
    pub fn create(notice_ttl: Duration, logger: StructuredLogger) -> Self {
        Self {
            mode: FormMode::Create,
            draft: PostDraft::default(),
            tags: TagSet::new(),
            metrics: PostMetrics::default(),
            saving: false,
            errors: Vec::new(),
            notice: Transient::new(notice_ttl),
            logger: logger.for_view("blog-form"),
        }
    }

    pub fn edit(post: &BlogPost, notice_ttl: Duration, logger: StructuredLogger) -> Self {
        let mut form = Self::create(notice_ttl, logger);
        form.mode = FormMode::Edit(post.id.clone());
        form.draft = PostDraft {
            title: post.title.clone(),
            excerpt: post.excerpt.clone(),
            content: post.content.clone(),
            category: post.category,
            status: post.status,
            author: post.author.clone(),
            publish_date: post.publish_date,
            featured: post.featured,
        };
        form.tags = post.tags.iter().map(String::as_str).collect();
        form.metrics = post.metrics;
        form
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    /// Add a tag from the input box. Trimmed and lower-cased; empty and
    /// duplicate tags are rejected.
    pub fn add_tag(&mut self, raw: &str) -> Result<String, CommerceError> {
        self.tags.add(raw).map(str::to_string)
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        self.tags.remove(tag)
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn notice(&self, now: Instant) -> Option<&'static str> {
        self.notice.get(now).copied()
    }

    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        if self.draft.title.trim().is_empty() {
            errors.push(FieldError {
                field: PostField::Title,
                message: "Title is required",
            });
        }
        if self.draft.content.trim().is_empty() {
            errors.push(FieldError {
                field: PostField::Content,
                message: "Content is required",
            });
        }
        if self.draft.excerpt.chars().count() > MAX_EXCERPT_CHARS {
            errors.push(FieldError {
                field: PostField::Excerpt,
                message: "Excerpt must be 300 characters or less",
            });
        }
        if self.draft.status == PostStatus::Scheduled && self.draft.publish_date.is_none() {
            errors.push(FieldError {
                field: PostField::PublishDate,
                message: "Scheduled posts need a publish date",
            });
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate and enter the saving state. Returns the post to persist.
    pub fn begin_submit(&mut self) -> Result<BlogPost, SubmitError> {
        if self.saving {
            return Err(SubmitError::AlreadySaving);
        }
        if let Err(errors) = self.validate() {
            self.errors = errors.clone();
            return Err(SubmitError::Invalid(errors));
        }
        self.errors.clear();
        self.saving = true;
        Ok(self.to_post())
    }

    /// Leave the saving state with the backend's answer.
    pub fn finish_submit(
        &mut self,
        result: Result<BlogPost, CommerceError>,
        now: Instant,
    ) -> Result<BlogPost, SubmitError> {
        self.saving = false;
        match result {
            Ok(saved) => {
                let message = match self.mode {
                    FormMode::Create => "Post created successfully!",
                    FormMode::Edit(_) => "Post updated successfully!",
                };
                self.notice.show(message, now);
                self.mode = FormMode::Edit(saved.id.clone());
                self.logger
                    .info_builder("post saved")
                    .field("id", saved.id.as_str())
                    .field("status", saved.status.as_str())
                    .emit();
                Ok(saved)
            }
            Err(e) => {
                self.logger
                    .error_builder("post save failed")
                    .field("error", e.to_string())
                    .emit();
                Err(SubmitError::Backend(e))
            }
        }
    }

    /// Validate, save and record the outcome. `clock` is read once the
    /// backend answers, so the notice window starts when the save completes.
    pub async fn submit<B: BlogBackend + ?Sized>(
        &mut self,
        backend: &B,
        clock: impl Fn() -> Instant,
    ) -> Result<BlogPost, SubmitError> {
        let post = self.begin_submit()?;
        let result = backend.save_post(post).await;
        self.finish_submit(result, clock())
    }

    fn to_post(&self) -> BlogPost {
        let id = match &self.mode {
            FormMode::Create => PostId::new(""),
            FormMode::Edit(id) => id.clone(),
        };
        BlogPost {
            id,
            title: self.draft.title.trim().to_string(),
            slug: slugify(&self.draft.title),
            excerpt: self.draft.excerpt.trim().to_string(),
            content: self.draft.content.clone(),
            category: self.draft.category,
            status: self.draft.status,
            author: self.draft.author.trim().to_string(),
            tags: self.tags.to_vec(),
            publish_date: self.draft.publish_date,
            featured: self.draft.featured,
            metrics: self.metrics,
        }
    }
}
