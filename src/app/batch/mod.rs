//! Language file batch workflows
//!
//! [`LanguageBatch`] runs the two cache generation workflows:
//!
//! - translation files: one PHP file per configured application and language
//! - applet language XMLs: one XML per language of every registered applet
//!
//! Each unit of work is fetched, validated and persisted before the next one
//! starts. The first failure ends the workflow; files written before it stay
//! in the cache.

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::app::cache::{applet_file_path, translation_file_path, CacheStore};
use crate::app::client::ApiClient;
use crate::app::output::{ConsoleOutput, OutputSink};
use crate::app::registry::{Applet, APPLETS};
use crate::app::response::ApiResponse;
use crate::app::validator::validate_response;
use crate::config::SystemConfig;
use crate::constants::api::{
    ACTION_NAMESPACE, GET_APPLET_LANGUAGES, GET_APPLET_LANGUAGE_FILE, GET_LANGUAGE_FILE,
    LANGUAGE_FILES_SYSTEM, SYSTEM_NAME,
};
use crate::errors::{ApiError, ApiResult, BatchError, BatchResult};

#[cfg(test)]
mod tests;

/// Orchestrates fetching language resources and writing them to the cache
pub struct LanguageBatch {
    api: Arc<dyn ApiClient>,
    cache: Arc<dyn CacheStore>,
    config: Arc<SystemConfig>,
    output: Arc<dyn OutputSink>,
    applets: Vec<Applet>,
}

impl LanguageBatch {
    /// Create a batch over the given collaborators
    ///
    /// Progress goes to the console until another sink is set with
    /// [`LanguageBatch::with_output`].
    pub fn new(
        api: Arc<dyn ApiClient>,
        cache: Arc<dyn CacheStore>,
        config: Arc<SystemConfig>,
    ) -> Self {
        Self {
            api,
            cache,
            config,
            output: Arc::new(ConsoleOutput),
            applets: APPLETS.to_vec(),
        }
    }

    /// Send progress text to `output`
    pub fn with_output(mut self, output: Arc<dyn OutputSink>) -> Self {
        self.output = output;
        self
    }

    #[cfg(test)]
    pub(crate) fn with_applets(mut self, applets: Vec<Applet>) -> Self {
        self.applets = applets;
        self
    }

    /// Generate the translation file of every configured application and language
    ///
    /// Returns the number of files written.
    ///
    /// # Errors
    ///
    /// Returns `BatchError` for the first language that could not be
    /// retrieved or saved; nothing after it is processed.
    pub async fn generate_language_files(&self) -> BatchResult<usize> {
        info!("Generating language files");
        self.render("\nGenerating language files.\n");

        let mut written = 0;
        for application in self.config.translated_applications.iter() {
            self.render(&format!("[APPLICATION: {}]\n", application.name));

            for language in &application.languages {
                let content = self
                    .fetch_translation_file(language)
                    .await
                    .inspect_err(|e| error!("{}", e))?;

                let path = translation_file_path(&application.name, language);
                self.cache
                    .put(&path, content.as_bytes())
                    .await
                    .map_err(|source| BatchError::SaveTranslationFile {
                        path: path.clone(),
                        source,
                    })
                    .inspect_err(|e| error!("{}", e))?;

                debug!("Cached translation file {}", path);
                self.render(&format!("\t[LANGUAGE: {}] OK\n", language));
                written += 1;
            }
        }

        info!("Generated {} language files", written);
        Ok(written)
    }

    /// Generate the language XMLs of every registered applet
    ///
    /// Returns the number of files written.
    ///
    /// # Errors
    ///
    /// Returns `BatchError` if an applet's languages cannot be listed, the
    /// list is empty, or one of its XMLs cannot be retrieved or saved.
    pub async fn generate_applet_language_xml_files(&self) -> BatchResult<usize> {
        info!("Generating applet language XMLs");
        self.render("\nGetting applet language XMLs.\n");

        let mut written = 0;
        for applet in &self.applets {
            written += self
                .generate_applet_files(applet)
                .await
                .inspect_err(|e| error!("{}", e))?;
        }

        self.render("\nApplet language XMLs generated.\n");
        info!("Generated {} applet language XMLs", written);
        Ok(written)
    }

    async fn generate_applet_files(&self, applet: &Applet) -> BatchResult<usize> {
        self.render(&format!(
            " Getting > {} ({}) language xmls.\n",
            applet.id, applet.directory
        ));

        let languages = self.fetch_applet_languages(applet).await?;
        self.render(&format!(
            " - Available languages: {}\n",
            languages.join(", ")
        ));

        for language in &languages {
            let content = self.fetch_applet_language_file(applet, language).await?;

            let path = applet_file_path(language);
            self.cache
                .put(&path, content.as_bytes())
                .await
                .map_err(|source| BatchError::SaveAppletFile {
                    applet: applet.id.to_string(),
                    language: language.clone(),
                    path: path.clone(),
                    source,
                })?;

            debug!("Cached applet language XML {}", path);
            self.render(&format!(
                " OK saving applet: ({}) language: ({}) was successful.\n",
                applet.id, language
            ));
        }

        self.render(&format!(
            " < {} ({}) language xml cached.\n",
            applet.id, applet.directory
        ));
        Ok(languages.len())
    }

    async fn fetch_translation_file(&self, language: &str) -> BatchResult<String> {
        self.fetch(GET_LANGUAGE_FILE, &[("language", language)])
            .await
            .map(|response| response.data_text())
            .map_err(|source| BatchError::TranslationFile {
                language: language.to_string(),
                source,
            })
    }

    async fn fetch_applet_languages(&self, applet: &Applet) -> BatchResult<Vec<String>> {
        let languages = self
            .fetch(GET_APPLET_LANGUAGES, &[("applet", applet.id)])
            .await
            .map(|response| response.data_languages())
            .map_err(|source| BatchError::AppletLanguages {
                applet: applet.id.to_string(),
                source,
            })?;

        if languages.is_empty() {
            return Err(BatchError::NoAppletLanguages {
                applet: applet.id.to_string(),
            });
        }

        Ok(languages)
    }

    async fn fetch_applet_language_file(
        &self,
        applet: &Applet,
        language: &str,
    ) -> BatchResult<String> {
        self.fetch(
            GET_APPLET_LANGUAGE_FILE,
            &[("applet", applet.id), ("language", language)],
        )
        .await
        .map(|response| response.data_text())
        .map_err(|source| BatchError::AppletLanguageFile {
            applet: applet.id.to_string(),
            language: language.to_string(),
            source,
        })
    }

    /// Call one `LanguageFiles` action and validate the answer
    async fn fetch(&self, action: &str, post_params: &[(&str, &str)]) -> ApiResult<ApiResponse> {
        let get_params = [("system", LANGUAGE_FILES_SYSTEM), ("action", action)];

        debug!("Requesting {} with {:?}", action, post_params);
        let response = self
            .api
            .call(SYSTEM_NAME, ACTION_NAMESPACE, &get_params, post_params)
            .await;

        validate_response(response.as_ref())?;
        response.ok_or(ApiError::CallFailed)
    }

    fn render(&self, text: &str) {
        self.output.render(text);
    }
}
