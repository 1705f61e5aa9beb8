//! End-to-end builds of small sites in temporary directories.

use std::{fs, path::Path};

use sitegen_core::Config;
use sitegen_generator::{BuildError, Builder, RedirectGenerator};
use tempfile::TempDir;

struct Site {
    _root: TempDir,
    config: Config,
}

impl Site {
    fn new() -> Self {
        let root = TempDir::new().unwrap();
        let config = Config::from_root(root.path(), "example.com");
        fs::create_dir_all(&config.content_dir).unwrap();
        fs::create_dir_all(&config.template_dir).unwrap();
        Self {
            _root: root,
            config,
        }
    }

    fn content(&self, rel: &str, body: impl AsRef<[u8]>) -> &Self {
        write(&self.config.content_dir.join(rel), body);
        self
    }

    fn template(&self, name: &str, body: &str) -> &Self {
        write(&self.config.template_dir.join(name), body);
        self
    }

    fn build(&self) -> Result<sitegen_generator::BuildStats, BuildError> {
        Builder::new(self.config.clone()).build()
    }

    fn output(&self, rel: &str) -> String {
        fs::read_to_string(self.config.output_dir.join(rel)).unwrap()
    }
}

fn write(path: &Path, body: impl AsRef<[u8]>) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, body).unwrap();
}

fn snapshot(dir: &Path) -> Vec<(String, Vec<u8>)> {
    let mut files: Vec<_> = sitegen_generator::walk_files(dir)
        .map(|p| {
            let p = p.unwrap();
            let rel = p.strip_prefix(dir).unwrap().to_string_lossy().into_owned();
            let bytes = fs::read(&p).unwrap();
            (rel, bytes)
        })
        .collect();
    files.sort();
    files
}

#[test]
fn test_markdown_post_renders_and_lands_in_sitemap() {
    let site = Site::new();
    site.template(
        "post.html",
        "<html><body>{{ current.content|safe }}</body></html>",
    )
    .content("posts/hello.md", "+++\ntemplate = \"post\"\n+++\n# Hi\n");

    site.build().unwrap();

    let html = site.output("posts/hello.html");
    assert!(html.contains("<h1 id=\"hi\">Hi</h1>"));

    let sitemap = site.output("sitemap.xml");
    assert!(sitemap.contains("<loc>https://example.com/posts/hello</loc>"));
    assert!(!sitemap.contains("<lastmod>"));
}

#[test]
fn test_data_file_copied_and_exposed() {
    let site = Site::new();
    let data = r#"{"menu": ["Home", "Blog"]}"#;
    site.template(
        "page.html",
        "<ul>{% for o in other %}{% if o.content %}{% for item in o.content.menu %}<li>{{ item }}</li>{% endfor %}{% endif %}{% endfor %}</ul>",
    )
    .content("data.json", data)
    .content("index.md", "+++\ntemplate = \"page\"\n+++\n");

    let stats = site.build().unwrap();

    assert_eq!(stats.data_files, 1);
    assert_eq!(site.output("data.json"), data);
    let html = site.output("index.html");
    assert!(html.contains("  <li>Home</li>\n  <li>Blog</li>\n"));
}

#[test]
fn test_no_markdown_still_writes_sitemap_and_robots() {
    let site = Site::new();
    site.content("style.css", "body {}");

    let stats = site.build().unwrap();

    assert_eq!(stats.pages, 0);
    let sitemap = site.output("sitemap.xml");
    assert!(sitemap.contains("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">"));
    assert!(!sitemap.contains("<url>"));
    assert_eq!(
        site.output("robots.txt"),
        "User-agent: *\nAllow: /\nSitemap: https://example.com/sitemap.xml\n"
    );
}

#[test]
fn test_missing_content_root_fails() {
    let site = Site::new();
    fs::remove_dir_all(&site.config.content_dir).unwrap();

    let err = site.build().unwrap_err();

    assert!(matches!(err, BuildError::Collector(_)));
    assert!(site.config.output_dir.exists());
    assert_eq!(fs::read_dir(&site.config.output_dir).unwrap().count(), 0);
}

#[test]
fn test_builds_are_idempotent() {
    let site = Site::new();
    site.template(
        "post.html",
        "<html><head><title>{{ current.title }}</title></head><body>{% for p in all %}<a href=\"{{ p.canonical|safe }}\">{{ p.title }}</a>{% endfor %}{{ current.content|safe }}</body></html>",
    )
    .content("a.md", "+++\ntemplate = \"post\"\ntitle = \"A\"\n+++\nFirst")
    .content("b/index.md", "+++\ntemplate = \"post\"\ntitle = \"B\"\npublication_date = 2024-03-01\n+++\nSecond")
    .content("b/pic.bin", [0u8, 159, 146, 150]);

    site.build().unwrap();
    let first = snapshot(&site.config.output_dir);
    site.build().unwrap();
    let second = snapshot(&site.config.output_dir);

    assert_eq!(first, second);
    assert!(site.output("sitemap.xml").contains("<lastmod>2024-03-01</lastmod>"));
}

#[test]
fn test_reserved_keys_are_overwritten() {
    let site = Site::new();
    site.template(
        "post.html",
        "{{ current.url|safe }}|{{ current.canonical|safe }}|{{ current.content|safe }}",
    )
    .content(
        "x.md",
        "+++\ntemplate = \"post\"\nurl = \"/fake\"\ncanonical = \"/fake\"\ncontent = \"fake\"\n+++\nreal",
    );
    let mut config = site.config.clone();
    config.build.pretty_html = false;

    Builder::new(config).build().unwrap();

    assert_eq!(site.output("x.html"), "/x.html|/x|<p>real</p>\n");
}

#[test]
fn test_static_file_copied_byte_identical() {
    let site = Site::new();
    let bytes: Vec<u8> = (0..=255).rev().collect();
    site.content("imgs/raw.dat", &bytes);

    site.build().unwrap();

    assert_eq!(
        fs::read(site.config.output_dir.join("imgs/raw.dat")).unwrap(),
        bytes
    );
}

#[test]
fn test_index_canonical_is_directory() {
    let site = Site::new();
    site.template("post.html", "<p>{{ current.canonical|safe }}</p>")
        .content("dir/index.md", "+++\ntemplate = \"post\"\n+++\n")
        .content("index.md", "+++\ntemplate = \"post\"\n+++\n");

    site.build().unwrap();

    assert_eq!(site.output("dir/index.html"), "<p>/dir/</p>\n");
    assert_eq!(site.output("index.html"), "<p>/</p>\n");
    let sitemap = site.output("sitemap.xml");
    assert!(sitemap.contains("<loc>https://example.com/</loc>"));
    assert!(sitemap.contains("<loc>https://example.com/dir/</loc>"));
}

#[test]
fn test_stale_output_removed() {
    let site = Site::new();
    write(&site.config.output_dir.join("old.html"), "stale");

    site.build().unwrap();

    assert!(!site.config.output_dir.join("old.html").exists());
}

#[test]
fn test_redirect_writes_htaccess() {
    let root = TempDir::new().unwrap();
    let out = root.path().join("public");

    RedirectGenerator::new("www.example.com", "example.com")
        .write(&out)
        .unwrap();

    let htaccess = fs::read_to_string(out.join(".htaccess")).unwrap();
    assert_eq!(
        htaccess,
        "RewriteEngine On\nRewriteCond %{HTTP_HOST} www.example.com\nRewriteRule (.*) https://example.com/$1 [R=301,L]\n"
    );
}
