// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::ObjectId;

/// A sequence flow connecting two elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flow {
    id: ObjectId,
    source: ObjectId,
    target: ObjectId,
    name: Option<String>,
}

impl Flow {
    pub fn new(id: ObjectId, source: ObjectId, target: ObjectId) -> Self {
        Self {
            id,
            source,
            target,
            name: None,
        }
    }

    pub fn new_with(
        id: ObjectId,
        source: ObjectId,
        target: ObjectId,
        name: Option<String>,
    ) -> Self {
        Self {
            id,
            source,
            target,
            name,
        }
    }

    pub fn id(&self) -> &ObjectId {
        &self.id
    }

    pub fn source(&self) -> &ObjectId {
        &self.source
    }

    pub fn target(&self) -> &ObjectId {
        &self.target
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name<T: Into<String>>(&mut self, name: Option<T>) {
        self.name = name.map(Into::into);
    }
}
