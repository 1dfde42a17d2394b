//! Voice output of replies.

use botica_common::{Notification, PlatformError};

use super::core::ChatApp;

impl ChatApp {
    pub(super) fn speak_reply(&self, which: Option<usize>) {
        let Some(reply) = self.pick_reply(which, "read") else {
            return;
        };
        let result = self.speaker.speak(&reply);
        self.report_speech(result);
    }

    pub(super) fn pause_speech(&self) {
        let result = self.speaker.pause();
        self.report_speech(result);
    }

    pub(super) fn resume_speech(&self) {
        let result = self.speaker.resume();
        self.report_speech(result);
    }

    pub(super) fn stop_speech(&self) {
        let result = self.speaker.cancel();
        self.report_speech(result);
    }

    fn report_speech(&self, result: Result<(), PlatformError>) {
        if let Err(e) = result {
            tracing::warn!(error = %e, "Speech command failed");
            self.notify(Notification::error(e.to_string()));
        }
    }
}
