//! Blog admin sections.

use std::time::Instant;

use salon_commerce::blog::{BlogCategory, BlogPost, PostStats, PostStatus};

use super::escape_html;
use crate::views::blog_admin::{BlogAdminList, FormMode, PostForm};

pub fn render_stats(stats: &PostStats) -> String {
    format!(
        r#"<div class="blog-stats">
        <div class="stat"><span class="stat-value">{}</span> Total</div>
        <div class="stat"><span class="stat-value">{}</span> Published</div>
        <div class="stat"><span class="stat-value">{}</span> Drafts</div>
        <div class="stat"><span class="stat-value">{}</span> Scheduled</div>
        <div class="stat"><span class="stat-value">{}</span> Views</div>
    </div>"#,
        stats.total, stats.published, stats.drafts, stats.scheduled, stats.total_views
    )
}

fn render_post_row(post: &BlogPost) -> String {
    let date = post
        .publish_date
        .map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| "Not scheduled".to_string());
    let tags: String = post
        .tags
        .iter()
        .map(|t| format!(r#"<span class="tag">#{}</span>"#, escape_html(t)))
        .collect();
    format!(
        r#"<tr data-post-id="{id}">
        <td><strong>{title}</strong>{featured}<p class="excerpt">{excerpt}</p><div class="tags">{tags}</div></td>
        <td>{category}</td>
        <td><span class="badge" style="background: {badge}">{status}</span></td>
        <td>{author}</td>
        <td>{date}</td>
        <td>{views} views · {read} min read</td>
    </tr>"#,
        id = escape_html(post.id.as_str()),
        title = escape_html(&post.title),
        featured = if post.featured { r#" <span class="featured-star">★</span>"# } else { "" },
        excerpt = escape_html(&post.excerpt),
        tags = tags,
        category = post.category.label(),
        badge = post.status.badge_color(),
        status = post.status.label(),
        author = escape_html(&post.author),
        date = date,
        views = post.metrics.views,
        read = post.read_time_minutes()
    )
}

/// Stats, filter controls and the post table.
pub fn render_post_list(list: &BlogAdminList) -> String {
    let filter = list.filter();
    let category_options: String = BlogCategory::ALL
        .iter()
        .map(|c| {
            let selected = if filter.category == Some(*c) { " selected" } else { "" };
            format!(r#"<option value="{}"{}>{}</option>"#, c.as_str(), selected, c.label())
        })
        .collect();
    let status_options: String = PostStatus::ALL
        .iter()
        .map(|s| {
            let selected = if filter.status == Some(*s) { " selected" } else { "" };
            format!(r#"<option value="{}"{}>{}</option>"#, s.as_str(), selected, s.label())
        })
        .collect();

    let visible = list.visible();
    let rows = if visible.is_empty() {
        r#"<tr><td colspan="6" class="empty">No posts match your filters.</td></tr>"#.to_string()
    } else {
        visible.into_iter().map(render_post_row).collect()
    };

    format!(
        r#"<section class="blog-admin" data-section="blog-admin">
    {stats}
    <div class="blog-filters">
        <input type="search" name="search" value="{search}" placeholder="Search posts...">
        <select name="category"><option value="all">All Categories</option>{categories}</select>
        <select name="status"><option value="all">All Statuses</option>{statuses}</select>
    </div>
    <table class="blog-posts"><tbody>{rows}</tbody></table>
</section>"#,
        stats = render_stats(&list.stats()),
        search = escape_html(&filter.search),
        categories = category_options,
        statuses = status_options,
        rows = rows
    )
}

/// Create/edit form with inline errors and the saved notice.
pub fn render_post_form(form: &PostForm, now: Instant) -> String {
    let heading = match form.mode() {
        FormMode::Create => "Create New Post",
        FormMode::Edit(_) => "Edit Post",
    };
    let errors: String = form
        .errors()
        .iter()
        .map(|e| format!(r#"<li class="field-error">{}</li>"#, e.message))
        .collect();
    let tags: String = form
        .tags()
        .iter()
        .map(|t| {
            format!(
                r#"<span class="tag">{0} <button data-remove-tag="{0}">&times;</button></span>"#,
                escape_html(t)
            )
        })
        .collect();
    let notice = form
        .notice(now)
        .map(|msg| format!(r#"<div class="toast toast--success">{}</div>"#, msg))
        .unwrap_or_default();
    let draft = &form.draft;

    format!(
        r#"<form class="post-form" data-section="post-form">
    <h2>{heading}</h2>
    {notice}
    <ul class="form-errors">{errors}</ul>
    <input name="title" value="{title}" required>
    <textarea name="excerpt" maxlength="300">{excerpt}</textarea>
    <textarea name="content" required>{content}</textarea>
    <input name="author" value="{author}">
    <input type="date" name="publishDate" value="{date}">
    <div class="tags">{tags}</div>
    <button type="submit"{disabled}>{submit}</button>
</form>"#,
        heading = heading,
        notice = notice,
        errors = errors,
        title = escape_html(&draft.title),
        excerpt = escape_html(&draft.excerpt),
        content = escape_html(&draft.content),
        author = escape_html(&draft.author),
        date = draft.publish_date.map(|d| d.to_string()).unwrap_or_default(),
        tags = tags,
        disabled = if form.is_saving() { " disabled" } else { "" },
        submit = if form.is_saving() { "Saving..." } else { "Save Post" }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::blog_admin::MockBlogBackend;
    use salon_observability::StructuredLogger;
    use std::time::Duration;

    #[tokio::test]
    async fn test_post_list_renders_rows_and_stats() {
        let backend = MockBlogBackend::with_sample_posts(Duration::ZERO);
        let mut list = BlogAdminList::new(StructuredLogger::capturing().0);
        list.load(&backend).await.unwrap();

        let html = render_post_list(&list);
        assert_eq!(html.matches("<tr data-post-id=").count(), 4);
        assert!(html.contains("Jun 15, 2024"));
        assert!(html.contains("Not scheduled"));
        assert!(html.contains("<span class=\"stat-value\">2</span> Published"));
    }

    #[test]
    fn test_form_shows_errors_and_saving_state() {
        let mut form = PostForm::create(Duration::from_secs(2), StructuredLogger::capturing().0);
        assert!(form.begin_submit().is_err());
        let html = render_post_form(&form, Instant::now());
        assert!(html.contains("Title is required"));
        assert!(html.contains("Create New Post"));

        form.draft.title = "T".into();
        form.draft.content = "C".into();
        form.begin_submit().unwrap();
        assert!(render_post_form(&form, Instant::now()).contains("Saving..."));
    }
}
