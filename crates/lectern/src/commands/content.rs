//! `lectern lesson` and `lectern quizzes`: typed views over the CMS.

use tabled::Tabled;

use lectern_core::{ContentService, LessonMeta, QuizSummary};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct QuizRow {
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Slug")]
    slug: String,
    #[tabled(rename = "Type")]
    quiz_type: String,
}

fn quiz_row(q: &QuizSummary) -> QuizRow {
    QuizRow {
        title: q.title.clone(),
        slug: q.slug.clone(),
        quiz_type: output::or_dash(q.quiz_type.as_deref()),
    }
}

fn lesson_detail(meta: &LessonMeta) -> String {
    output::detail_lines(&[
        ("title", meta.title.clone()),
        ("slug", meta.slug.clone()),
        ("course", output::or_dash(meta.course.as_deref())),
        ("program", output::or_dash(meta.program.as_deref())),
        (
            "content",
            meta.content
                .as_ref()
                .map_or_else(|| "-".into(), |d| format!("{} blocks", d.blocks().len())),
        ),
    ])
}

pub async fn lesson(
    service: &ContentService,
    slug: &str,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let lesson = service
        .lesson_by_slug(slug)
        .await?
        .ok_or_else(|| CliError::NotFound {
            resource_type: "lesson".into(),
            identifier: slug.to_owned(),
        })?;

    let meta = LessonMeta::from(lesson);
    let out = output::render_single(&global.output, &meta, lesson_detail, |m| m.slug.clone());
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn quizzes(service: &ContentService, global: &GlobalOpts) -> Result<(), CliError> {
    let quizzes = service.quizzes().await?;
    let out = output::render_list(&global.output, &quizzes, quiz_row, |q| q.slug.clone());
    output::print_output(&out, global.quiet);
    Ok(())
}
