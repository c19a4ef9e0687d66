// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GraphQL documents sent to AniList.

/// Resolve a username to a user id.
pub const USER_QUERY: &str = r#"
query User($name: String) {
  User(name: $name) {
    id
  }
}
"#;

/// One page of a user's media list entries.
pub const MEDIA_LIST_QUERY: &str = r#"
query MediaList($page: Int, $perPage: Int, $userId: Int) {
  Page(page: $page, perPage: $perPage) {
    mediaList(userId: $userId) {
      id
      mediaId
      createdAt
      customLists
      advancedScores
      notes
      private
      repeat
      progressVolumes
      progress
      updatedAt
      status
      score
      userId
      startedAt { year month day }
      completedAt { year month day }
      media { id type }
    }
  }
}
"#;

/// One page of a user's list activities.
pub const ACTIVITY_QUERY: &str = r#"
query Page($page: Int, $perPage: Int, $userId: Int) {
  Page(page: $page, perPage: $perPage) {
    activities(userId: $userId, type: MEDIA_LIST) {
      ... on ListActivity {
        createdAt
        id
        likeCount
        progress
        userId
        type
        status
        isLocked
        replyCount
        media { id type }
      }
    }
  }
}
"#;
