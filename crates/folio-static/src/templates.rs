//! The page shell shared by every generated page.

use minijinja::{context, AutoEscape, Environment};

use crate::config::SiteConfig;

/// Prism release loaded from the CDN.
pub const PRISM_VERSION: &str = "1.29.0";

/// A link in the bottom navigation bar.
#[derive(Debug, Clone, serde::Serialize)]
pub struct NavLink {
    /// Display text
    pub title: String,
    /// Target URL
    pub href: String,
}

/// Renders pages into the site shell using minijinja.
pub struct PageTemplate {
    env: Environment<'static>,
    include_nav: bool,
    nav: Vec<NavLink>,
    analytics_id: String,
}

impl PageTemplate {
    /// Create the template for a site.
    pub fn new(config: &SiteConfig) -> Self {
        let mut env = Environment::new();
        // Page bodies and configured URLs are trusted; titles are escaped explicitly.
        env.set_auto_escape_callback(|_| AutoEscape::None);

        env.add_template("page.html", PAGE_TEMPLATE)
            .expect("Failed to add page template");

        env.add_template("nav.html", NAV_TEMPLATE)
            .expect("Failed to add nav template");

        Self {
            env,
            include_nav: config.include_nav,
            nav: nav_links(config),
            analytics_id: config.analytics_id.clone(),
        }
    }

    /// Wrap `content` in the page shell. The content is inserted verbatim.
    pub fn render(&self, title: &str, content: &str) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template("page.html")?;

        tmpl.render(context! {
            title => title,
            content => content,
            include_nav => self.include_nav,
            nav => &self.nav,
            analytics_id => &self.analytics_id,
            prism_version => PRISM_VERSION,
        })
    }
}

fn nav_links(config: &SiteConfig) -> Vec<NavLink> {
    [
        ("Home", "index.html"),
        ("README", "README.html"),
        ("Docs", "docs.html"),
        ("GitHub", config.repository_url.as_str()),
        ("npm", config.package_url.as_str()),
    ]
    .into_iter()
    .map(|(title, href)| NavLink {
        title: title.to_string(),
        href: href.to_string(),
    })
    .collect()
}

const PAGE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{{ title | escape }}</title>

  <link href="https://cdnjs.cloudflare.com/ajax/libs/prism/{{ prism_version }}/themes/prism-tomorrow.min.css" rel="stylesheet" />
  <link href="https://cdnjs.cloudflare.com/ajax/libs/prism/{{ prism_version }}/plugins/line-numbers/prism-line-numbers.min.css" rel="stylesheet" />

  <!-- after prism so local rules win -->
  <link rel="stylesheet" href="style.css">
{% if analytics_id %}
  <script async src="https://www.googletagmanager.com/gtag/js?id={{ analytics_id }}"></script>
  <script>
    window.dataLayer = window.dataLayer || [];
    function gtag(){dataLayer.push(arguments);}
    gtag('js', new Date());
    gtag('config', '{{ analytics_id }}');
  </script>
{% endif %}
  <script src="https://cdnjs.cloudflare.com/ajax/libs/prism/{{ prism_version }}/prism.min.js"></script>
  <script src="https://cdnjs.cloudflare.com/ajax/libs/prism/{{ prism_version }}/components/prism-typescript.min.js"></script>
  <script src="https://cdnjs.cloudflare.com/ajax/libs/prism/{{ prism_version }}/plugins/line-numbers/prism-line-numbers.min.js"></script>
  <script>
    document.addEventListener('DOMContentLoaded', function () {
      Prism.highlightAll();

      const parallaxBg = document.querySelector('.parallax-background');
      if (parallaxBg) {
        window.addEventListener('scroll', function () {
          parallaxBg.style.transform = 'translateY(' + window.pageYOffset + 'px)';
        });
      }
    });
  </script>
</head>
<body>
  <div id="root" class="container-fluid" style="padding-bottom: 5rem;">
    <div class="row">
      <div class="col-xs-12 col-sm-12 col-md-12">
        <div id="container-fluid">{{ content }}</div>
      </div>
    </div>
  </div>
{% if include_nav %}
{% include "nav.html" %}
{% endif %}
</body>
</html>
"##;

const NAV_TEMPLATE: &str = r##"<nav class="bottom-nav" style="position: fixed; bottom: 0; left: 0; right: 0;">
  <ul class="nav-list">
  {% for link in nav %}
    <li class="nav-item"><a href="{{ link.href }}">{{ link.title | escape }}</a></li>
  {% endfor %}
  </ul>
</nav>"##;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn wraps_content_verbatim() {
        let page = PageTemplate::new(&SiteConfig::default());

        let html = page.render("Testeranto", "<h1>Hi</h1>").unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Testeranto</title>"));
        assert!(html.contains("<div id=\"container-fluid\"><h1>Hi</h1></div>"));
        assert!(html.contains("name=\"viewport\""));
    }

    #[test]
    fn escapes_title() {
        let page = PageTemplate::new(&SiteConfig::default());

        let html = page.render("a <b> & c", "").unwrap();

        assert!(html.contains("<title>a &lt;b&gt; &amp; c</title>"));
    }

    #[test]
    fn references_prism_and_local_stylesheet() {
        let page = PageTemplate::new(&SiteConfig::default());

        let html = page.render("t", "").unwrap();

        assert!(html.contains("prism/1.29.0/prism.min.js"));
        assert!(html.contains("prism-tomorrow.min.css"));
        assert!(html.contains("<link rel=\"stylesheet\" href=\"style.css\">"));
        assert!(html.contains(".parallax-background"));
    }

    #[test]
    fn renders_navigation_when_enabled() {
        let page = PageTemplate::new(&SiteConfig::default());

        let html = page.render("t", "").unwrap();

        assert!(html.contains("class=\"bottom-nav\""));
        assert!(html.contains("<a href=\"index.html\">Home</a>"));
        assert!(html.contains("<a href=\"README.html\">README</a>"));
        assert!(html.contains("<a href=\"docs.html\">Docs</a>"));
        assert!(html.contains("https://github.com/adamwong246/testeranto"));
        assert!(html.contains("https://www.npmjs.com/package/testeranto"));
    }

    #[test]
    fn nav_links_follow_config_urls() {
        let links = nav_links(&SiteConfig {
            repository_url: "https://git.example.com/folio".to_string(),
            package_url: "https://pkg.example.com/folio".to_string(),
            ..Default::default()
        });

        let pairs: Vec<(&str, &str)> = links
            .iter()
            .map(|l| (l.title.as_str(), l.href.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("Home", "index.html"),
                ("README", "README.html"),
                ("Docs", "docs.html"),
                ("GitHub", "https://git.example.com/folio"),
                ("npm", "https://pkg.example.com/folio"),
            ]
        );
    }

    #[test]
    fn rendering_is_deterministic() {
        let page = PageTemplate::new(&SiteConfig::default());

        let first = page.render("docs.md", "<p>same</p>").unwrap();
        let second = page.render("docs.md", "<p>same</p>").unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn omits_navigation_when_disabled() {
        let page = PageTemplate::new(&SiteConfig {
            include_nav: false,
            ..Default::default()
        });

        let html = page.render("t", "").unwrap();

        assert!(!html.contains("bottom-nav"));
    }

    #[test]
    fn analytics_snippet_follows_config() {
        let with = PageTemplate::new(&SiteConfig::default())
            .render("t", "")
            .unwrap();
        assert!(with.contains("gtag/js?id=G-2BREL4738L"));

        let without = PageTemplate::new(&SiteConfig {
            analytics_id: String::new(),
            ..Default::default()
        })
        .render("t", "")
        .unwrap();
        assert!(!without.contains("googletagmanager"));
    }
}
