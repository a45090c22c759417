use web_sys::window;
use yew::prelude::*;

use crate::page::PageEffects;

#[derive(Clone, PartialEq)]
struct Project {
    title: AttrValue,
    summary: AttrValue,
    stack: AttrValue,
}

fn projects() -> Vec<Project> {
    vec![
        Project {
            title: AttrValue::from("Project SHADE"),
            summary: AttrValue::from("LSTM component for Austin heat-wave forecasting."),
            stack: AttrValue::from("Python · PyTorch"),
        },
        Project {
            title: AttrValue::from("FlightPath"),
            summary: AttrValue::from("AI flight search experience from TAMUHack 2025."),
            stack: AttrValue::from("TypeScript · React"),
        },
        Project {
            title: AttrValue::from("TechHub Delivery Platform"),
            summary: AttrValue::from("Internal system handling 150+ monthly orders."),
            stack: AttrValue::from("Java · PostgreSQL"),
        },
    ]
}

#[derive(Properties, PartialEq)]
struct ProjectCardProps {
    project: Project,
}

#[function_component(ProjectCard)]
fn project_card(props: &ProjectCardProps) -> Html {
    let project = &props.project;

    html! {
        <article class="card">
            <h3>{project.title.clone()}</h3>
            <p>{project.summary.clone()}</p>
            <span class="card-stack muted">{project.stack.clone()}</span>
        </article>
    }
}

#[function_component(App)]
fn app() -> Html {
    use_effect_with((), |_| {
        let effects = PageEffects::start();
        move || drop(effects)
    });

    html! {
        <>
            <header class="site-header">
                <a class="brand" href="#top">{"KC"}</a>
                <nav aria-label="Sections">
                    <a href="#about">{"About"}</a>
                    <a href="#work">{"Work"}</a>
                    <a href="#contact">{"Contact"}</a>
                </nav>
            </header>

            <div class="hero" id="top">
                <div class="floating-shape shape-a" aria-hidden="true"></div>
                <div class="floating-shape shape-b" aria-hidden="true"></div>
                <div class="floating-shape shape-c" aria-hidden="true"></div>
                <div class="hero-content">
                    <h1 class="name">{"Kyler Cao"}</h1>
                    <p class="tagline">{"Computer Science at Texas A&M. Dependable software, practical machine learning."}</p>
                    <a class="button" href="#work">{"See the work"}</a>
                </div>
            </div>

            <main id="content">
                <section id="about" aria-labelledby="about-heading">
                    <h2 id="about-heading">{"About"}</h2>
                    <p>
                        {"I build tools for campus operations at TechHub and spend the rest of my time on models that have to survive contact with real data."}
                    </p>
                </section>

                <section id="work" aria-labelledby="work-heading">
                    <h2 id="work-heading">{"Work"}</h2>
                    <div class="cards">
                        { for projects().into_iter().map(|project| html! {
                            <ProjectCard project={project} />
                        }) }
                    </div>
                </section>

                <section id="contact" aria-labelledby="contact-heading">
                    <h2 id="contact-heading">{"Contact"}</h2>
                    <p>{"The fastest way to reach me is GitHub or LinkedIn."}</p>
                    <div class="contact-links">
                        <a class="button" href="https://github.com/kyler505" target="_blank" rel="noopener noreferrer">{"GitHub"}</a>
                        <a class="button" href="https://www.linkedin.com/in/kylercao" target="_blank" rel="noopener noreferrer">{"LinkedIn"}</a>
                        <a class="button" href="#top">{"Back to top"}</a>
                    </div>
                </section>
            </main>
        </>
    }
}

pub fn run() {
    yew::Renderer::<App>::with_root(
        window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("app"))
            .expect("missing #app mount point"),
    )
    .render();
}
