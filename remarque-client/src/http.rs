use async_trait::async_trait;

use crate::{
    api::{
        self, Comment, CommentId, DeleteQuery, EditComment, MutationOutcome, NewComment,
        StoreError, STORE_COMMENTS_PATH,
    },
    CommentEndpoint, Error, RemoteStore,
};

/// Comment endpoint reached over HTTP
#[derive(Clone, Debug)]
pub struct HttpEndpoint {
    client: reqwest::Client,
    url: String,
}

impl HttpEndpoint {
    pub fn new(client: reqwest::Client, url: String) -> HttpEndpoint {
        HttpEndpoint { client, url }
    }
}

async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, Error> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.bytes().await?;
    match api::Error::parse(&body) {
        Ok(err) => Err(Error::Api(err)),
        Err(_) => Err(Error::Status {
            status: status.as_u16(),
            body: String::from_utf8_lossy(&body).into_owned(),
        }),
    }
}

#[async_trait(?Send)]
impl CommentEndpoint for HttpEndpoint {
    async fn list(&self) -> Result<Vec<Comment>, Error> {
        let resp = self.client.get(&self.url).send().await?;
        Ok(check_status(resp).await?.json().await?)
    }

    async fn create(&self, comment: &NewComment) -> Result<Vec<Comment>, Error> {
        let resp = self.client.post(&self.url).json(comment).send().await?;
        Ok(check_status(resp).await?.json().await?)
    }

    async fn edit(&self, edit: &EditComment) -> Result<MutationOutcome, Error> {
        let resp = self.client.patch(&self.url).json(edit).send().await?;
        let body = check_status(resp).await?.json().await?;
        Ok(MutationOutcome::from_body(body))
    }

    async fn delete(&self, id: &CommentId) -> Result<MutationOutcome, Error> {
        let resp = self
            .client
            .delete(&self.url)
            .query(&DeleteQuery {
                comment_id: id.clone(),
            })
            .send()
            .await?;
        let body = check_status(resp).await?.json().await?;
        Ok(MutationOutcome::from_body(body))
    }
}

/// Store reached through its REST interface
#[derive(Clone, Debug)]
pub struct HttpStore {
    client: reqwest::Client,
    url: String,
    key: String,
}

impl HttpStore {
    pub fn new(client: reqwest::Client, url: String, key: String) -> HttpStore {
        HttpStore { client, url, key }
    }
}

#[async_trait(?Send)]
impl RemoteStore for HttpStore {
    async fn insert(&self, comment: &NewComment) -> Result<Vec<Comment>, Error> {
        let resp = self
            .client
            .post(format!("{}{}", self.url, STORE_COMMENTS_PATH))
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
            .header("Prefer", "return=representation")
            .json(comment)
            .send()
            .await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp.json().await?);
        }
        let body = resp.bytes().await?;
        match serde_json::from_slice::<StoreError>(&body) {
            Ok(err) => Err(Error::Api(err.into())),
            Err(_) => Err(Error::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            }),
        }
    }
}
