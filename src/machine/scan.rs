// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The scan-and-decode step of a tick.

use tokio::time::Instant;

use super::Provisioner;
use crate::credential;
use crate::event::ProvisioningEventKind;
use crate::peripheral::{DecodeError, DecodedSymbol, Orientation};

impl Provisioner {
    /// Pulls at most one frame and processes the symbols found in it.
    ///
    /// Every located symbol is decoded, and each attempt, successful or not,
    /// arms a settling pause. When several symbols carry a credential the
    /// last one wins.
    pub(super) fn scan_for_credentials(&mut self, now: Instant) {
        let Some(frame) = self.peripherals.camera.try_get_frame() else {
            return;
        };
        self.context.stats.frames += 1;
        self.peripherals.presentation.preview_frame(&frame);

        let count = self.peripherals.decoder.detect(&frame);
        if count > 0 {
            tracing::debug!(count, "Symbols located");
        }

        for index in 0..count {
            self.context.stats.symbols += 1;
            match self.decode_symbol(index) {
                Ok(symbol) => self.handle_decoded(symbol, now),
                Err(error) => self.handle_decode_failure(error, now),
            }
        }

        self.peripherals.camera.release(frame);
    }

    /// Decodes symbol `index`, retrying once mirrored on a recoverable error.
    fn decode_symbol(&mut self, index: usize) -> Result<DecodedSymbol, DecodeError> {
        match self.peripherals.decoder.decode(index, Orientation::Normal) {
            Err(error) if error.is_recoverable() => {
                tracing::debug!(index, %error, "Retrying mirrored");
                self.context.stats.mirror_retries += 1;
                self.peripherals.decoder.decode(index, Orientation::Mirrored)
            }
            result => result,
        }
    }

    fn handle_decoded(&mut self, symbol: DecodedSymbol, now: Instant) {
        self.peripherals.presentation.play_success_tone();
        self.context.stats.decoded += 1;
        tracing::info!(
            version = symbol.version,
            ecc = %symbol.ecc_level,
            mask = symbol.mask,
            len = symbol.payload.len(),
            "Decoded QR symbol"
        );

        let settle = self.config.success_settle();
        let credential = credential::parse(&symbol.payload);
        if !credential.has_ssid() {
            let line = format!("QR: {}", symbol.payload);
            self.log(&line);
            self.events.emit(ProvisioningEventKind::PayloadIgnored {
                payload: symbol.payload,
            });
            self.context.settle.arm(now, settle);
            return;
        }

        if let Err(e) = self.peripherals.store.save(&credential) {
            tracing::warn!(error = %e, "Failed to store scanned credential");
        }
        self.peripherals.connectivity.persist_last_credential(true);

        let line = format!("SSID: {}", credential.ssid());
        self.log(&line);
        self.events.emit(ProvisioningEventKind::CredentialScanned {
            ssid: credential.ssid().to_string(),
        });
        self.request_connection(credential);
        self.context.settle.arm(now, settle);
    }

    fn handle_decode_failure(&mut self, error: DecodeError, now: Instant) {
        tracing::warn!(%error, "QR decode failed");
        self.peripherals.presentation.play_error_tone();
        self.context.stats.failed += 1;

        let line = format!("decode: {error}");
        self.log(&line);
        self.events
            .emit(ProvisioningEventKind::DecodeFailed { error });
        self.context.settle.arm(now, self.config.failure_settle());
    }
}
