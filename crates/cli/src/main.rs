use anyhow::{bail, Context, Result};
use catalog::{Catalog, DifficultyLevel, Mentor, Resource, ResourceType, SuccessStory};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use pipeline::{
    MentorFilter, MentorSort, Page, ResourceFilter, ResourceSort, StoryFilter, StorySort,
};
use serde::Serialize;
use service::{SearchService, ServiceConfig};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;

/// AspireBridge search - find mentors, resources and success stories
#[derive(Parser)]
#[command(name = "aspire-search")]
#[command(about = "Search the AspireBridge mentorship catalog", long_about = None)]
struct Cli {
    /// Directory holding mentors.json, resources.json and stories.json
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    /// Optional JSON service config
    #[arg(long)]
    config: Option<PathBuf>,

    /// Simulated backend latency per query, in milliseconds
    #[arg(long)]
    latency_ms: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search mentors
    Mentors {
        #[command(flatten)]
        filter: MentorArgs,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Search learning resources
    Resources {
        #[command(flatten)]
        filter: ResourceArgs,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Search success stories
    Stories {
        #[command(flatten)]
        filter: StoryArgs,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Show one mentor profile
    Mentor {
        #[arg(long)]
        id: String,
    },

    /// Show the home feed (top mentors, recent stories, popular resources)
    Home {
        #[arg(long)]
        json: bool,
    },

    /// Run benchmark to test performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of requests in flight at once
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

#[derive(Args)]
struct PageArgs {
    /// Page number, starting at 1
    #[arg(long, default_value = "1")]
    page: usize,

    /// Results per page (defaults to the service's page size)
    #[arg(long)]
    page_size: Option<usize>,

    /// Print the page as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct MentorArgs {
    /// Free text matched against name, bio and expertise
    #[arg(short, long)]
    query: Option<String>,

    /// Exam category, repeatable (e.g. --category UPSC --category SSC)
    #[arg(long = "category")]
    categories: Vec<String>,

    #[arg(long)]
    min_rating: Option<f64>,

    #[arg(long)]
    max_rating: Option<f64>,

    /// Minimum hourly rate in rupees
    #[arg(long)]
    min_price: Option<u32>,

    #[arg(long)]
    max_price: Option<u32>,

    #[arg(long)]
    min_experience: Option<u32>,

    #[arg(long)]
    max_experience: Option<u32>,

    /// Subject, repeatable
    #[arg(long)]
    expertise: Vec<String>,

    /// Only verified mentors
    #[arg(long)]
    verified: bool,

    /// recent, popular, rating, price, experience or alphabetical
    #[arg(long)]
    sort: Option<String>,
}

impl MentorArgs {
    fn into_filter(self) -> MentorFilter {
        MentorFilter {
            query: self.query,
            exam_categories: self.categories,
            min_rating: self.min_rating,
            max_rating: self.max_rating,
            min_price: self.min_price,
            max_price: self.max_price,
            min_experience: self.min_experience,
            max_experience: self.max_experience,
            expertise: self.expertise,
            is_verified: self.verified.then_some(true),
            sort_by: parse_sort(self.sort.as_deref()),
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ResourceTypeArg {
    Pdf,
    Video,
    Notes,
    PracticeTest,
    Strategy,
    Timetable,
    Link,
    Audio,
    Image,
    Presentation,
}

impl From<ResourceTypeArg> for ResourceType {
    fn from(arg: ResourceTypeArg) -> Self {
        match arg {
            ResourceTypeArg::Pdf => ResourceType::Pdf,
            ResourceTypeArg::Video => ResourceType::Video,
            ResourceTypeArg::Notes => ResourceType::Notes,
            ResourceTypeArg::PracticeTest => ResourceType::PracticeTest,
            ResourceTypeArg::Strategy => ResourceType::Strategy,
            ResourceTypeArg::Timetable => ResourceType::Timetable,
            ResourceTypeArg::Link => ResourceType::Link,
            ResourceTypeArg::Audio => ResourceType::Audio,
            ResourceTypeArg::Image => ResourceType::Image,
            ResourceTypeArg::Presentation => ResourceType::Presentation,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum DifficultyArg {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl From<DifficultyArg> for DifficultyLevel {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Beginner => DifficultyLevel::Beginner,
            DifficultyArg::Intermediate => DifficultyLevel::Intermediate,
            DifficultyArg::Advanced => DifficultyLevel::Advanced,
            DifficultyArg::Expert => DifficultyLevel::Expert,
        }
    }
}

#[derive(Args)]
struct ResourceArgs {
    /// Category id, e.g. upsc
    #[arg(long)]
    category: Option<String>,

    /// Subcategory id, e.g. ssc_cgl
    #[arg(long)]
    subcategory: Option<String>,

    #[arg(long = "type", value_enum)]
    resource_type: Option<ResourceTypeArg>,

    #[arg(long, value_enum)]
    difficulty: Option<DifficultyArg>,

    #[arg(long)]
    language: Option<String>,

    #[arg(long)]
    min_rating: Option<f32>,

    /// Tag, repeatable; exact match
    #[arg(long = "tag")]
    tags: Vec<String>,

    #[arg(short, long)]
    query: Option<String>,

    /// recent, popular, most_downloaded, highest_rated, most_viewed or alphabetical
    #[arg(long)]
    sort: Option<String>,
}

impl ResourceArgs {
    fn into_filter(self) -> ResourceFilter {
        ResourceFilter {
            exam_category: self.category,
            exam_subcategory: self.subcategory,
            resource_type: self.resource_type.map(ResourceType::from),
            difficulty: self.difficulty.map(DifficultyLevel::from),
            language: self.language,
            min_rating: self.min_rating,
            tags: self.tags,
            search_query: self.query,
            sort_by: parse_sort(self.sort.as_deref()),
        }
    }
}

#[derive(Args)]
struct StoryArgs {
    #[arg(long)]
    category: Option<String>,

    #[arg(long)]
    subcategory: Option<String>,

    /// Year the exam was cleared
    #[arg(long)]
    year: Option<u16>,

    #[arg(long)]
    min_rank: Option<u32>,

    #[arg(long)]
    max_rank: Option<u32>,

    #[arg(long)]
    attempts: Option<u32>,

    #[arg(long = "tag")]
    tags: Vec<String>,

    #[arg(short, long)]
    query: Option<String>,

    /// recent, popular, most_liked, most_viewed, rank_ascending, rank_descending or alphabetical
    #[arg(long)]
    sort: Option<String>,
}

impl StoryArgs {
    fn into_filter(self) -> StoryFilter {
        StoryFilter {
            exam_category: self.category,
            exam_subcategory: self.subcategory,
            year: self.year,
            min_rank: self.min_rank,
            max_rank: self.max_rank,
            attempts: self.attempts,
            tags: self.tags,
            search_query: self.query,
            sort_by: parse_sort(self.sort.as_deref()),
        }
    }
}

/// Any unknown or missing sort name means the default (recent)
fn parse_sort<S>(raw: Option<&str>) -> S
where
    S: std::str::FromStr + Default,
{
    raw.and_then(|s| s.parse().ok()).unwrap_or_default()
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = build_config(&cli)?;

    println!("Loading catalog from {}...", cli.data_dir.display());
    let start = Instant::now();
    let catalog = Arc::new(
        Catalog::load_from_dir(&cli.data_dir).context("Failed to load the catalog")?,
    );
    let (mentors, resources, stories) = catalog.counts();
    println!(
        "{} Loaded {} mentors, {} resources and {} stories in {:?}",
        "✓".green(),
        mentors,
        resources,
        stories,
        start.elapsed()
    );

    tracing::debug!("Service config: {:?}", config);
    let service = SearchService::new(catalog, config);

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Mentors { filter, page } => handle_mentors(&service, filter, page).await?,
        Commands::Resources { filter, page } => handle_resources(&service, filter, page).await?,
        Commands::Stories { filter, page } => handle_stories(&service, filter, page).await?,
        Commands::Mentor { id } => handle_mentor(&service, &id).await?,
        Commands::Home { json } => handle_home(&service, json).await?,
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(service, requests, concurrent).await?,
    }

    Ok(())
}

/// Config file first, then command-line overrides
fn build_config(cli: &Cli) -> Result<ServiceConfig> {
    let mut config = match &cli.config {
        Some(path) => ServiceConfig::from_json_file(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(latency_ms) = cli.latency_ms {
        config = config.with_simulated_latency(Duration::from_millis(latency_ms));
    }
    Ok(config)
}

async fn handle_mentors(service: &SearchService, args: MentorArgs, page: PageArgs) -> Result<()> {
    let filter = args.into_filter();
    let result = service
        .search_mentors(None, Some(filter), page.page, page.page_size)
        .await?;
    if page.json {
        return print_json(&result);
    }

    print_page_header("Mentors", &result);
    for (i, mentor) in result.items.iter().enumerate() {
        print_mentor_line(rank_on_page(&page, service.config().default_page_size, i), mentor);
    }
    print_page_footer(&result);
    Ok(())
}

async fn handle_resources(
    service: &SearchService,
    args: ResourceArgs,
    page: PageArgs,
) -> Result<()> {
    let filter = args.into_filter();
    let result = service
        .search_resources(Some(filter), page.page, page.page_size)
        .await?;
    if page.json {
        return print_json(&result);
    }

    print_page_header("Resources", &result);
    for (i, resource) in result.items.iter().enumerate() {
        print_resource_line(rank_on_page(&page, service.config().default_page_size, i), resource);
    }
    print_page_footer(&result);
    Ok(())
}

async fn handle_stories(service: &SearchService, args: StoryArgs, page: PageArgs) -> Result<()> {
    let filter = args.into_filter();
    let result = service
        .search_stories(Some(filter), page.page, page.page_size)
        .await?;
    if page.json {
        return print_json(&result);
    }

    print_page_header("Success stories", &result);
    for (i, story) in result.items.iter().enumerate() {
        print_story_line(rank_on_page(&page, service.config().default_page_size, i), story);
    }
    print_page_footer(&result);
    Ok(())
}

/// Handle the 'mentor' command
async fn handle_mentor(service: &SearchService, id: &str) -> Result<()> {
    let Some(mentor) = service.get_mentor(id).await else {
        bail!("Mentor {} not found", id);
    };

    println!("{}", mentor.name.bold().blue());
    println!("{}{} ({})", "• ".green(), mentor.exam_cleared, mentor.exam_category);
    println!("{}Rank {} in {}", "• ".green(), mentor.rank, mentor.exam_year);
    println!(
        "{}Rating {:.1} from {} reviews",
        "• ".cyan(),
        mentor.rating,
        mentor.reviews_count
    );
    println!(
        "{}₹{}/hour, {} years of experience",
        "• ".cyan(),
        mentor.hourly_rate,
        mentor.experience_years
    );
    println!(
        "{}{} sessions, {} students helped",
        "• ".cyan(),
        mentor.sessions_completed,
        mentor.students_helped
    );
    if mentor.is_verified {
        println!("{}{}", "• ".cyan(), "Verified".green());
    }
    println!("Expertise: {}", mentor.expertise.join(", "));
    println!();
    println!("{}", mentor.bio);
    Ok(())
}

/// Handle the 'home' command
async fn handle_home(service: &SearchService, json: bool) -> Result<()> {
    let feed = service.home_feed().await?;
    if json {
        return print_json(&feed);
    }

    println!("{}", "Top rated mentors".bold().blue());
    for (i, mentor) in feed.top_mentors.iter().enumerate() {
        print_mentor_line(i + 1, mentor);
    }
    println!();
    println!("{}", "Recent success stories".bold().blue());
    for (i, story) in feed.recent_stories.iter().enumerate() {
        print_story_line(i + 1, story);
    }
    println!();
    println!("{}", "Popular resources".bold().blue());
    for (i, resource) in feed.popular_resources.iter().enumerate() {
        print_resource_line(i + 1, resource);
    }
    Ok(())
}

const BENCH_CATEGORIES: [&str; 5] = ["UPSC", "Banking", "Railways", "SSC", "Defence"];
const BENCH_QUERIES: [&str; 5] = ["aptitude", "essay", "mathematics", "strategy", "current affairs"];

/// One randomly chosen search against one of the three domains
async fn random_search(service: &SearchService) -> Result<()> {
    let category = BENCH_CATEGORIES[rand::random::<u32>() as usize % BENCH_CATEGORIES.len()];
    let query = BENCH_QUERIES[rand::random::<u32>() as usize % BENCH_QUERIES.len()];

    match rand::random::<u32>() % 3 {
        0 => {
            let filter = MentorFilter {
                exam_categories: vec![category.to_string()],
                sort_by: MentorSort::Rating,
                ..Default::default()
            };
            service.search_mentors(None, Some(filter), 1, None).await?;
        }
        1 => {
            let filter = ResourceFilter {
                search_query: Some(query.to_string()),
                sort_by: ResourceSort::Popular,
                ..Default::default()
            };
            service.search_resources(Some(filter), 1, None).await?;
        }
        _ => {
            let filter = StoryFilter {
                exam_category: Some(category.to_lowercase()),
                sort_by: StorySort::RankAscending,
                ..Default::default()
            };
            service.search_stories(Some(filter), 1, None).await?;
        }
    }
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(service: SearchService, requests: usize, concurrent: usize) -> Result<()> {
    if requests == 0 {
        bail!("Benchmark needs at least one request");
    }

    let permits = Arc::new(Semaphore::new(concurrent.max(1)));
    let wall_clock = Instant::now();

    // Use tokio::spawn to make concurrent requests
    let mut handles = vec![];
    for _ in 0..requests {
        let service = service.clone();
        let permits = permits.clone();
        let handle = tokio::spawn(async move {
            let _permit = permits.acquire_owned().await?;
            let start = Instant::now();
            random_search(&service).await?;
            Ok::<_, anyhow::Error>(start.elapsed())
        });
        handles.push(handle);
    }

    // Wait for all tasks to complete and collect timings
    let mut timings = vec![];
    for handle in handles {
        let elapsed = handle.await??;
        timings.push(elapsed);
    }
    let total_time = wall_clock.elapsed();

    timings.sort();
    let avg_latency = timings.iter().sum::<Duration>() / timings.len() as u32;
    let throughput = requests as f64 / total_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {} ({} concurrent)", requests, concurrent.max(1));
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(&timings, 0.50));
    println!("P95 latency: {:?}", percentile(&timings, 0.95));
    println!("P99 latency: {:?}", percentile(&timings, 0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Nearest-rank percentile of sorted, non-empty timings
fn percentile(sorted: &[Duration], fraction: f64) -> Duration {
    let index = ((sorted.len() as f64 * fraction) as usize).min(sorted.len().saturating_sub(1));
    sorted.get(index).copied().unwrap_or_default()
}

/// 1-based position of the `i`th item of this page in the full result
fn rank_on_page(page: &PageArgs, default_page_size: usize, i: usize) -> usize {
    let page_size = page.page_size.unwrap_or(default_page_size);
    page.page.saturating_sub(1) * page_size + i + 1
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize results")?;
    println!("{json}");
    Ok(())
}

fn print_page_header<T>(title: &str, page: &Page<T>) {
    println!(
        "{}",
        format!("{} ({} matching):", title, page.total_count).bold().blue()
    );
    if page.items.is_empty() {
        println!("  {}", "No results".yellow());
    }
}

fn print_page_footer<T>(page: &Page<T>) {
    if let Some(next) = page.next_page {
        println!("{}", format!("More results: --page {next}").dimmed());
    }
}

fn print_mentor_line(rank: usize, mentor: &Mentor) {
    println!(
        "{}. {} [{}] ★ {:.1} - ₹{}/hr, {} yrs - {}",
        rank.to_string().green(),
        mentor.name.bold(),
        mentor.exam_category,
        mentor.rating,
        mentor.hourly_rate,
        mentor.experience_years,
        mentor.expertise.join(", ")
    );
}

fn print_resource_line(rank: usize, resource: &Resource) {
    println!(
        "{}. {} [{:?}, {}] ★ {:.1} - {} downloads, {} views",
        rank.to_string().green(),
        resource.title.bold(),
        resource.resource_type,
        resource.language,
        resource.rating,
        resource.downloads,
        resource.views
    );
}

fn print_story_line(rank: usize, story: &SuccessStory) {
    let exam_rank = story
        .rank
        .map(|r| format!("AIR {r}"))
        .unwrap_or_else(|| "unranked".to_string());
    println!(
        "{}. {} - {} ({}, {}, attempt {}) ♥ {}",
        rank.to_string().green(),
        story.title.bold(),
        story.author_name,
        exam_rank,
        story.year,
        story.attempts,
        story.likes
    );
}
