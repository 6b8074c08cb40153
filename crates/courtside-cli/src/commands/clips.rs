//! Highlight clip commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;

use courtside::services::ClipFeedQuery;
use courtside::{ClipId, UserId, VenueId};

use crate::output;

use super::{anonymous_client, signed_in_client};

#[derive(Subcommand, Debug)]
pub enum ClipCommand {
    /// Browse the clip feed
    Feed(FeedArgs),
    /// Like a clip
    Like {
        /// Clip id
        #[arg(long)]
        clip: String,
    },
    /// Comment on a clip
    Comment {
        /// Clip id
        #[arg(long)]
        clip: String,

        /// Comment text
        #[arg(long)]
        text: String,
    },
}

#[derive(Args, Debug)]
pub struct FeedArgs {
    /// Restrict the feed to one author
    #[arg(long)]
    pub user: Option<String>,

    /// Restrict the feed to one venue
    #[arg(long)]
    pub venue: Option<String>,

    /// Maximum number of clips
    #[arg(long)]
    pub limit: Option<u32>,

    /// Print the raw response as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn handle(cmd: ClipCommand, api: &str) -> Result<()> {
    match cmd {
        ClipCommand::Feed(args) => feed(args, api).await,
        ClipCommand::Like { clip } => like(&clip, api).await,
        ClipCommand::Comment { clip, text } => comment(&clip, &text, api).await,
    }
}

async fn feed(args: FeedArgs, api: &str) -> Result<()> {
    let client = anonymous_client(api)?;

    let user = args
        .user
        .as_deref()
        .map(UserId::new)
        .transpose()
        .context("Invalid user id")?;
    let venue = args
        .venue
        .as_deref()
        .map(VenueId::new)
        .transpose()
        .context("Invalid venue id")?;

    let query = ClipFeedQuery {
        user_id: user.as_ref(),
        venue_id: venue.as_ref(),
        limit: args.limit,
        cursor: None,
    };

    let page = client
        .highlights()
        .feed(&query)
        .await
        .context("Failed to fetch feed")?;

    if args.json {
        return output::json_pretty(&page);
    }

    for clip in &page.clips {
        println!(
            "{}  {}  {}s  ♥{} 💬{}",
            clip.id.as_str().dimmed(),
            clip.title.bold(),
            clip.duration_secs,
            clip.like_count,
            clip.comment_count
        );
    }
    if let Some(cursor) = &page.cursor {
        output::field("Next cursor", cursor);
    }

    Ok(())
}

async fn like(clip: &str, api: &str) -> Result<()> {
    let (client, _session) = signed_in_client(api).await?;
    let clip = ClipId::new(clip).context("Invalid clip id")?;

    let state = client
        .social()
        .like(&clip)
        .await
        .context("Failed to like clip")?;

    output::success(&format!("Liked ({} total)", state.like_count));
    Ok(())
}

async fn comment(clip: &str, text: &str, api: &str) -> Result<()> {
    let (client, _session) = signed_in_client(api).await?;
    let clip = ClipId::new(clip).context("Invalid clip id")?;

    let posted = client
        .social()
        .comment(&clip, text)
        .await
        .context("Failed to post comment")?;

    output::success("Comment posted");
    output::field("Comment", &posted.id);
    Ok(())
}
