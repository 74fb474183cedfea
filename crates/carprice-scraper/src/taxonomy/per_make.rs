//! Taxonomy built from one models-by-make request per make.

use carprice_core::LabelSource;
use scraper::{ElementRef, Html, Selector};

use crate::client::Fetch;
use crate::error::ScraperError;
use crate::html::{element_text, selector};

use super::{MakeOption, Taxonomy};

pub(super) async fn build<F: Fetch>(
    fetcher: &F,
    options: &[MakeOption],
    url_template: &str,
    model_css: &str,
    label: LabelSource,
) -> Result<Taxonomy, ScraperError> {
    let model_selector = selector(model_css)?;
    let mut taxonomy = Taxonomy::new();

    for option in options {
        let url = url_template.replace("{make_id}", &option.id);
        let fragment = fetcher.fetch_text(&url).await?;
        let models = parse_models(&fragment, &model_selector, label);
        tracing::debug!(make = %option.name, models = models.len(), "fetched models");
        taxonomy.add_models(&option.name, models);
    }

    Ok(taxonomy)
}

/// Collects non-blank model names from a models fragment, in document order.
pub(super) fn parse_models(
    fragment: &str,
    model_selector: &Selector,
    label: LabelSource,
) -> Vec<String> {
    let document = Html::parse_fragment(fragment);
    document
        .select(model_selector)
        .filter_map(|element| match label {
            LabelSource::SelfText => Some(element),
            LabelSource::NextSibling => element.next_siblings().find_map(ElementRef::wrap),
        })
        .map(|element| element_text(element).trim().to_owned())
        .filter(|name| !name.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MULTIMODEL: &str = r#"
        <div class="row">
          <input type="checkbox" class="model" value="1"><label>320</label>
          <input type="checkbox" class="model" value="2"><label>X5</label>
          <input type="checkbox" class="model" value="3"><label> </label>
          <input type="checkbox" class="model" value="4"><label>320</label>
        </div>
    "#;

    #[test]
    fn next_sibling_labels() {
        let sel = selector(".model").unwrap();
        let models = parse_models(MULTIMODEL, &sel, LabelSource::NextSibling);
        assert_eq!(models, vec!["320", "X5", "320"]);
    }

    #[test]
    fn self_text_labels() {
        let sel = selector("li.model").unwrap();
        let models = parse_models(
            "<ul><li class=\"model\">Golf</li><li class=\"model\">Passat</li></ul>",
            &sel,
            LabelSource::SelfText,
        );
        assert_eq!(models, vec!["Golf", "Passat"]);
    }

    #[test]
    fn empty_fragment_has_no_models() {
        let sel = selector(".model").unwrap();
        assert!(parse_models("", &sel, LabelSource::NextSibling).is_empty());
    }
}
