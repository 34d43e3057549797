//! Static HTML pages for every route.
//!
//! Pages are emitted as well-formed XHTML-style markup (void elements self-closed) so they can be
//! embedded, diffed and parsed as XML. The home page inlines the idle orbital SVG; the build also
//! emits one locked SVG per industry.

use crate::interaction::InteractionState;
use crate::orbital::{OrbitalSettings, layout_orbital};
use crate::svg::{SvgRenderOptions, render_orbital_svg};
use crate::Result;
use htmlize::{escape_attribute, escape_text};
use nucleus_core::catalog::{DirectoryQuery, IndustryFilter, company_counts};
use nucleus_core::model::company_count_label;
use nucleus_core::{Company, DataProvider, IconRegistry, Route, SiteConfig, SiteInfo, UploadPolicy};
use std::fmt::Write as _;

const NAV: [(&str, Route); 5] = [
    ("Home", Route::Home),
    ("About", Route::About),
    (
        "Companies",
        Route::Companies {
            industry: IndustryFilter::All,
        },
    ),
    ("Careers", Route::Careers),
    ("Contact", Route::Contact),
];

const VALUES: [(&str, &str); 4] = [
    (
        "Integrity",
        "We conduct our business with the highest standards of ethics and transparency.",
    ),
    (
        "Excellence",
        "We strive for excellence in everything we do, setting industry benchmarks.",
    ),
    (
        "Sustainability",
        "We are committed to sustainable practices that benefit communities and the environment.",
    ),
    (
        "Collaboration",
        "We believe in the power of teamwork and building strong partnerships.",
    ),
];

/// One output file of the static build, relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub path: String,
    pub contents: String,
}

pub struct SiteRenderer<'a, P: ?Sized> {
    provider: &'a P,
    icons: &'a IconRegistry,
    info: SiteInfo,
    orbital: OrbitalSettings,
    policy: UploadPolicy,
    svg: SvgRenderOptions,
}

impl<'a, P: DataProvider + ?Sized> SiteRenderer<'a, P> {
    pub fn new(provider: &'a P, icons: &'a IconRegistry, config: &SiteConfig) -> Self {
        Self {
            provider,
            icons,
            info: SiteInfo::from_config(config),
            orbital: OrbitalSettings::from_config(config),
            policy: UploadPolicy::from_config(config),
            svg: SvgRenderOptions::default(),
        }
    }

    /// Base options for every embedded or exported orbital SVG. `diagram_id` is always replaced
    /// per page; `title` and `center_label` fall back to the site name when unset.
    pub fn with_svg_options(mut self, svg: SvgRenderOptions) -> Self {
        self.svg = svg;
        self
    }

    pub fn info(&self) -> &SiteInfo {
        &self.info
    }

    /// Every page plus `orbital/<industry-id>.svg` for each displayed industry.
    pub fn pages(&self) -> Result<Vec<RenderedPage>> {
        let mut routes = vec![
            Route::Home,
            Route::About,
            Route::Companies {
                industry: IndustryFilter::All,
            },
        ];
        routes.extend(
            self.provider
                .list_active_companies(None)
                .into_iter()
                .map(|c| Route::company(c.slug.as_str())),
        );
        routes.extend([
            Route::Careers,
            Route::Contact,
            Route::NotFound {
                path: "/404".to_string(),
            },
        ]);

        let mut pages = Vec::with_capacity(routes.len());
        for route in &routes {
            pages.push(RenderedPage {
                path: route.output_file(),
                contents: self.render_route(route)?,
            });
        }

        for industry in self.provider.list_active_industries() {
            let state = InteractionState::Locked(industry.id.clone());
            pages.push(RenderedPage {
                path: format!("orbital/{}.svg", industry.id),
                contents: self.orbital_svg(&state, &format!("orbital-{}", industry.id))?,
            });
        }

        tracing::debug!(files = pages.len(), "site rendered");
        Ok(pages)
    }

    pub fn orbital_svg(&self, state: &InteractionState, diagram_id: &str) -> Result<String> {
        let layout = layout_orbital(self.provider, state, &self.orbital);
        let mut options = self.svg.clone();
        options.diagram_id = Some(diagram_id.to_string());
        options
            .title
            .get_or_insert_with(|| format!("{} industries and companies", self.info.name));
        options
            .center_label
            .get_or_insert_with(|| initials(&self.info.name));
        render_orbital_svg(&layout, self.icons, &options)
    }

    pub fn render_route(&self, route: &Route) -> Result<String> {
        let (title, body) = match route {
            Route::Home => (self.info.name.clone(), self.home_body()?),
            Route::About => (format!("About | {}", self.info.name), self.about_body()),
            Route::Companies { industry } => (
                format!("Companies | {}", self.info.name),
                self.companies_body(industry),
            ),
            Route::CompanyDetail { slug } => match self.provider.company_by_slug(slug) {
                Some(company) => (
                    format!("{} | {}", company.name, self.info.name),
                    self.company_body(company),
                ),
                None => (
                    format!("Company Not Found | {}", self.info.name),
                    self.company_missing_body(),
                ),
            },
            Route::Careers => (format!("Careers | {}", self.info.name), self.careers_body()),
            Route::Contact => (format!("Contact | {}", self.info.name), self.contact_body()),
            Route::NotFound { path } => {
                tracing::debug!(path = %path, "rendering not-found page");
                (
                    format!("Page Not Found | {}", self.info.name),
                    self.not_found_body(),
                )
            }
        };
        Ok(self.document(&title, route, &body))
    }

    fn href(&self, route: &Route) -> String {
        escape_attribute(route.href(&self.info.route_prefix)).into_owned()
    }

    fn document(&self, title: &str, current: &Route, body: &str) -> String {
        let mut out = String::new();
        out.push_str("<!DOCTYPE html>\n");
        out.push_str(r#"<html lang="en"><head><meta charset="utf-8"/>"#);
        out.push_str(r#"<meta name="viewport" content="width=device-width, initial-scale=1"/>"#);
        let _ = write!(out, "<title>{}</title></head><body>", escape_text(title));

        out.push_str(r#"<header class="site-header"><nav>"#);
        let _ = write!(
            out,
            r#"<a class="brand" href="{}">{}</a><ul>"#,
            self.href(&Route::Home),
            escape_text(&self.info.name)
        );
        for (label, route) in &NAV {
            let current_attr = if std::mem::discriminant(route) == std::mem::discriminant(current) {
                r#" aria-current="page""#
            } else {
                ""
            };
            let _ = write!(
                out,
                r#"<li><a href="{}"{current_attr}>{label}</a></li>"#,
                self.href(route)
            );
        }
        out.push_str("</ul></nav></header>");

        let _ = write!(out, "<main>{body}</main>");

        let _ = write!(
            out,
            r#"<footer class="site-footer"><p>{legal}</p><p><a href="mailto:{email}">{email_text}</a> | {phone} | {location}</p><p>Established {founded}</p></footer>"#,
            legal = escape_text(&self.info.legal_name),
            email = escape_attribute(&self.info.email),
            email_text = escape_text(&self.info.email),
            phone = escape_text(&self.info.phone),
            location = escape_text(&self.info.location),
            founded = escape_text(&self.info.founded),
        );
        out.push_str("</body></html>\n");
        out
    }

    fn home_body(&self) -> Result<String> {
        let mut out = String::new();
        let _ = write!(
            out,
            r#"<section class="hero"><h1>Building Tomorrow's <span>Legacy Today</span></h1><p>{name} brings together {n} companies across diverse industries.</p><a href="{about}">Learn More</a></section>"#,
            name = escape_text(&self.info.legal_name),
            n = self.provider.list_active_companies(None).len(),
            about = self.href(&Route::About),
        );

        out.push_str(r#"<section class="orbital">"#);
        out.push_str(&self.orbital_svg(&InteractionState::Idle, "orbital")?);
        out.push_str("</section>");

        out.push_str(r#"<section class="industries"><h2>Diverse Industries</h2><ul>"#);
        for (industry, count) in company_counts(self.provider) {
            let glyph = self.icons.resolve(industry.icon.as_deref());
            let route = Route::Companies {
                industry: IndustryFilter::Only(industry.id.clone()),
            };
            let _ = write!(
                out,
                r#"<li data-industry-id="{id}" data-icon="{icon}"><a href="{href}"><h3>{name}</h3><span class="count">{count}</span></a>"#,
                id = escape_attribute(&industry.id),
                icon = escape_attribute(glyph.name),
                href = self.href(&route),
                name = escape_text(&industry.name),
                count = company_count_label(count),
            );
            if let Some(desc) = industry.description.as_deref() {
                let _ = write!(out, "<p>{}</p>", escape_text(desc));
            }
            out.push_str("</li>");
        }
        out.push_str("</ul></section>");

        let _ = write!(
            out,
            r#"<section class="cta"><h2>Partner With Us</h2><a href="{}">Get in Touch</a></section>"#,
            self.href(&Route::Contact)
        );
        Ok(out)
    }

    fn about_body(&self) -> String {
        let mut out = String::new();
        let _ = write!(
            out,
            r#"<section class="hero"><h1>About <span>{}</span></h1><p>A visionary conglomerate dedicated to building businesses that create lasting impact, foster innovation, and drive sustainable growth across multiple industries.</p></section>"#,
            escape_text(&self.info.name)
        );
        out.push_str(r#"<section class="mission"><h2>Our Mission</h2><p>To build a diversified portfolio of companies that deliver exceptional value, foster innovation, and contribute to sustainable development across multiple industries.</p><h2>Our Vision</h2><p>To be recognized as a leading conglomerate that shapes industries, empowers communities, and sets benchmarks for corporate excellence in India and beyond.</p></section>"#);
        out.push_str(r#"<section class="values"><h2>Our Core Values</h2><ul>"#);
        for (title, text) in VALUES {
            let _ = write!(out, "<li><h3>{title}</h3><p>{text}</p></li>");
        }
        out.push_str("</ul></section>");
        let industries = self.provider.list_active_industries().len();
        let companies = self.provider.list_active_companies(None).len();
        let _ = write!(
            out,
            r#"<section class="stats"><dl><dt>Founded</dt><dd>{founded}</dd><dt>Industries</dt><dd>{industries}</dd><dt>Companies</dt><dd>{companies}</dd></dl></section>"#,
            founded = escape_text(&self.info.founded),
        );
        out
    }

    fn companies_body(&self, industry: &IndustryFilter) -> String {
        let query = DirectoryQuery::new("", industry.clone());
        let companies = query.apply(self.provider);

        let mut out = String::new();
        out.push_str(r#"<section class="hero"><h1>Our Group <span>Companies</span></h1></section>"#);

        out.push_str(r#"<section class="filters"><ul class="industry-filter">"#);
        let all = Route::Companies {
            industry: IndustryFilter::All,
        };
        let _ = write!(
            out,
            r#"<li><a href="{}"{}>All Industries</a></li>"#,
            self.href(&all),
            selected(*industry == IndustryFilter::All)
        );
        for ind in self.provider.list_active_industries() {
            let filter = IndustryFilter::Only(ind.id.clone());
            let _ = write!(
                out,
                r#"<li><a href="{}"{}>{}</a></li>"#,
                self.href(&Route::Companies {
                    industry: filter.clone()
                }),
                selected(*industry == filter),
                escape_text(&ind.name)
            );
        }
        out.push_str("</ul></section>");

        out.push_str(r#"<section class="directory">"#);
        if companies.is_empty() {
            out.push_str(r#"<p class="empty">No companies found matching your criteria.</p>"#);
        } else {
            out.push_str("<ul>");
            for company in companies {
                self.company_card(&mut out, company);
            }
            out.push_str("</ul>");
        }
        out.push_str("</section>");
        out
    }

    fn company_card(&self, out: &mut String, company: &Company) {
        let industry = self.provider.industry(&company.industry_id);
        let _ = write!(
            out,
            r#"<li class="company-card" data-company-slug="{slug}"><a href="{href}"><h3>{name}</h3>"#,
            slug = escape_attribute(&company.slug),
            href = self.href(&Route::company(company.slug.as_str())),
            name = escape_text(&company.name),
        );
        if let Some(industry) = industry {
            let _ = write!(
                out,
                r#"<span class="industry" data-icon="{}">{}</span>"#,
                escape_attribute(self.icons.resolve(industry.icon.as_deref()).name),
                escape_text(&industry.name)
            );
        }
        if let Some(label) = company.incorporation_label() {
            let _ = write!(out, r#"<span class="incorporated">{label}</span>"#);
        }
        out.push_str("</a></li>");
    }

    fn company_body(&self, company: &Company) -> String {
        let industry = self.provider.industry(&company.industry_id);
        let industry_name = industry.map(|i| i.name.as_str());

        let mut out = String::new();
        let _ = write!(
            out,
            r#"<article class="company" data-company-slug="{slug}"><a class="back" href="{back}">Back to Companies</a><h1>{name}</h1>"#,
            slug = escape_attribute(&company.slug),
            back = self.href(&Route::Companies {
                industry: IndustryFilter::All
            }),
            name = escape_text(&company.name),
        );
        if let Some(name) = industry_name {
            let _ = write!(out, r#"<p class="industry">{}</p>"#, escape_text(name));
        }

        let _ = write!(
            out,
            "<section><h2>About</h2><p>{}</p></section>",
            escape_text(&company.description_or_default(&self.info.legal_name, industry_name))
        );

        let services = company.service_list();
        if !services.is_empty() {
            out.push_str("<section><h2>Services</h2><ul>");
            for service in services {
                let _ = write!(out, "<li>{}</li>", escape_text(service));
            }
            out.push_str("</ul></section>");
        }

        let cin = company.cin.as_deref().filter(|s| !s.is_empty());
        let incorporated = company.incorporation_long();
        if cin.is_some() || incorporated.is_some() {
            out.push_str("<section><h2>Legal Information</h2><dl>");
            if let Some(cin) = cin {
                let _ = write!(out, "<dt>CIN Number</dt><dd>{}</dd>", escape_text(cin));
            }
            if let Some(date) = incorporated {
                let _ = write!(out, "<dt>Incorporation Date</dt><dd>{date}</dd>");
            }
            out.push_str("</dl></section>");
        }

        out.push_str("<section><h2>Contact</h2><ul>");
        if let Some(email) = company.email.as_deref().filter(|s| !s.is_empty()) {
            let _ = write!(
                out,
                r#"<li><a href="mailto:{}">{}</a></li>"#,
                escape_attribute(email),
                escape_text(email)
            );
        }
        if let Some(phone) = company.phone.as_deref().filter(|s| !s.is_empty()) {
            let _ = write!(out, "<li>{}</li>", escape_text(phone));
        }
        let _ = write!(
            out,
            r#"<li>{}</li></ul><a href="{}">Contact Us</a></section>"#,
            escape_text(&self.info.location),
            self.href(&Route::Contact)
        );

        let jobs = self.provider.list_open_jobs(Some(&company.id));
        if !jobs.is_empty() {
            let _ = write!(
                out,
                r#"<section><h2>Open Positions</h2><p><a href="{}">{} open position{}</a></p></section>"#,
                self.href(&Route::Careers),
                jobs.len(),
                if jobs.len() == 1 { "" } else { "s" }
            );
        }
        out.push_str("</article>");
        out
    }

    fn company_missing_body(&self) -> String {
        format!(
            r#"<section class="not-found"><h1>Company Not Found</h1><p>The company you're looking for doesn't exist.</p><a href="{}">Back to Companies</a></section>"#,
            self.href(&Route::Companies {
                industry: IndustryFilter::All
            })
        )
    }

    fn careers_body(&self) -> String {
        let jobs = self.provider.list_open_jobs(None);
        let mut out = String::new();
        out.push_str(r#"<section class="hero"><h1>Join Our <span>Team</span></h1></section>"#);
        out.push_str(r#"<section class="jobs">"#);
        if jobs.is_empty() {
            let _ = write!(
                out,
                r#"<div class="empty"><h2>No Open Positions</h2><p>There are no open positions at the moment. Send us your resume and we will reach out when a role opens up.</p><a href="{}">Contact Us</a></div>"#,
                self.href(&Route::Contact)
            );
        } else {
            out.push_str("<ul>");
            for job in jobs {
                let company = job
                    .company_id
                    .as_deref()
                    .and_then(|id| self.provider.company(id));
                let _ = write!(
                    out,
                    r#"<li class="job" data-job-id="{id}"><h3>{title}</h3>"#,
                    id = escape_attribute(&job.id),
                    title = escape_text(&job.title),
                );
                if let Some(company) = company {
                    let _ = write!(
                        out,
                        r#"<p class="company"><a href="{}">{}</a></p>"#,
                        self.href(&Route::company(company.slug.as_str())),
                        escape_text(&company.name)
                    );
                }
                let details = [
                    job.location.as_deref(),
                    job.job_type.as_deref(),
                    job.experience_level.as_deref(),
                    job.salary_range.as_deref(),
                ];
                let details: Vec<_> = details
                    .into_iter()
                    .flatten()
                    .filter(|s| !s.is_empty())
                    .map(|s| escape_text(s).into_owned())
                    .collect();
                if !details.is_empty() {
                    let _ = write!(out, r#"<p class="meta">{}</p>"#, details.join(" | "));
                }
                if let Some(desc) = job.description.as_deref() {
                    let _ = write!(out, "<p>{}</p>", escape_text(desc));
                }
                self.application_form(&mut out, &job.id);
                out.push_str("</li>");
            }
            out.push_str("</ul>");
        }
        let _ = write!(
            out,
            r#"</section><section class="cta"><h2>Don't see a fit?</h2><a href="{}">Send Your Resume</a></section>"#,
            self.href(&Route::Contact)
        );
        out
    }

    /// Per-job application form; field names match `ApplicationForm`.
    fn application_form(&self, out: &mut String, job_id: &str) {
        let job = escape_attribute(job_id);
        let _ = write!(
            out,
            r#"<form class="application-form" method="post" data-job-id="{job}"><input type="hidden" name="job_id" value="{job}"/>"#
        );
        let _ = write!(
            out,
            r#"<label for="apply-{job}-name">Full Name *</label><input id="apply-{job}-name" name="name" required="required"/>"#
        );
        let _ = write!(
            out,
            r#"<label for="apply-{job}-email">Email *</label><input id="apply-{job}-email" name="email" type="email" required="required"/>"#
        );
        let _ = write!(
            out,
            r#"<label for="apply-{job}-phone">Phone</label><input id="apply-{job}-phone" name="phone" type="tel"/>"#
        );
        let _ = write!(
            out,
            r#"<label for="apply-{job}-resume">Resume *</label><input id="apply-{job}-resume" name="resume" type="file" accept="{accept}" required="required"/><p class="hint">PDF or Word document, max {limit}</p>"#,
            accept = escape_attribute(self.policy.allowed_types.join(",")),
            limit = nucleus_core::forms::fmt_size_limit(self.policy.max_bytes),
        );
        let _ = write!(
            out,
            r#"<label for="apply-{job}-cover">Cover Letter</label><textarea id="apply-{job}-cover" name="cover_letter"></textarea>"#
        );
        out.push_str(r#"<button type="submit">Submit Application</button></form>"#);
    }

    fn contact_body(&self) -> String {
        let mut out = String::new();
        let _ = write!(
            out,
            r#"<section class="hero"><h1>Contact <span>Us</span></h1></section><section class="contact-info"><p><a href="mailto:{email}">{email_text}</a></p><p>{phone}</p><p>{location}</p></section>"#,
            email = escape_attribute(&self.info.email),
            email_text = escape_text(&self.info.email),
            phone = escape_text(&self.info.phone),
            location = escape_text(&self.info.location),
        );

        out.push_str(r#"<form class="contact-form" method="post">"#);
        out.push_str(r#"<label for="name">Full Name *</label><input id="name" name="name" required="required"/>"#);
        out.push_str(r#"<label for="email">Email *</label><input id="email" name="email" type="email" required="required"/>"#);
        out.push_str(r#"<label for="phone">Phone</label><input id="phone" name="phone" type="tel"/>"#);
        out.push_str(r#"<label for="company">Company</label><select id="company" name="company">"#);
        out.push_str(r#"<option value="general">General Inquiry</option>"#);
        for company in self.provider.list_active_companies(None) {
            let _ = write!(
                out,
                r#"<option value="{}">{}</option>"#,
                escape_attribute(&company.id),
                escape_text(&company.name)
            );
        }
        out.push_str("</select>");
        out.push_str(r#"<label for="subject">Subject *</label><input id="subject" name="subject" required="required"/>"#);
        out.push_str(r#"<label for="message">Message *</label><textarea id="message" name="message" required="required"></textarea>"#);
        let _ = write!(
            out,
            r#"<label for="resume">Resume</label><input id="resume" name="resume" type="file" accept="{accept}"/><p class="hint">PDF or Word document, max {limit}</p>"#,
            accept = escape_attribute(self.policy.allowed_types.join(",")),
            limit = nucleus_core::forms::fmt_size_limit(self.policy.max_bytes),
        );
        out.push_str(r#"<button type="submit">Send Message</button></form>"#);
        out
    }

    fn not_found_body(&self) -> String {
        format!(
            r#"<section class="not-found"><h1>404</h1><p>Oops! Page not found</p><a href="{}">Return to Home</a></section>"#,
            self.href(&Route::Home)
        )
    }
}

fn selected(on: bool) -> &'static str {
    if on { r#" aria-current="true""# } else { "" }
}

/// Group mark drawn on the center disc: `Jayashri Group` -> `JG`.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|w| w.chars().next())
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_uppercase)
        .take(3)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::initials;

    #[test]
    fn initials_take_leading_letters() {
        assert_eq!(initials("Jayashri Group"), "JG");
        assert_eq!(initials("  acme  & co of india "), "ACO");
        assert_eq!(initials(""), "");
    }
}
